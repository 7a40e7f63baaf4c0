use leptos::prelude::*;

use crate::content::QuestionContent;

/// Side panel describing the question under the pointer.
#[component]
pub fn QuestionDetails(#[prop(into)] question: Signal<Option<QuestionContent>>) -> impl IntoView {
	move || {
		question.get().map(|q| {
			view! {
				<aside class="question-details">
					<h2>{q.short_title}</h2>
					<p class="question-text">{q.text}</p>
					<div class="question-meta">
						{q.difficulty.map(|d| view! { <span class="badge difficulty">{d}</span> })}
						{q.topic.map(|t| view! { <span class="badge topic">{t}</span> })}
					</div>
					{q.description.map(|d| view! { <p class="question-description">{d}</p> })}
					{(!q.skills_tested.is_empty())
						.then(|| {
							view! {
								<ul class="skills">
									{q.skills_tested
										.into_iter()
										.map(|skill| view! { <li>{skill}</li> })
										.collect_view()}
								</ul>
							}
						})}
				</aside>
			}
		})
	}
}
