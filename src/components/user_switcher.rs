use leptos::prelude::*;

use crate::content::UserSummary;
use crate::session::GraphEvent;

/// Picks the active learner and resets their progress.
#[component]
pub fn UserSwitcher(
	users: Vec<UserSummary>,
	#[prop(into)] active_user: Signal<Option<String>>,
	events: RwSignal<Vec<GraphEvent>>,
) -> impl IntoView {
	let on_change = move |ev: leptos::ev::Event| {
		let user = event_target_value(&ev);
		events.update(|queue| queue.push(GraphEvent::SelectUser(user)));
	};
	let on_reset = move |_: leptos::ev::MouseEvent| {
		events.update(|queue| queue.push(GraphEvent::Reset));
	};

	view! {
		<div class="user-switcher">
			<label for="user-select">"Learner"</label>
			<select id="user-select" on:change=on_change>
				{users
					.into_iter()
					.map(|user| {
						let id = user.id.clone();
						let selected = move || active_user.get().as_deref() == Some(id.as_str());
						view! {
							<option value=user.id selected=selected>
								{user.name}
							</option>
						}
					})
					.collect_view()}
			</select>
			<button
				on:click=on_reset
				disabled=move || active_user.get().is_none()
				title="Forget saved progress and rebuild the graph"
			>
				"Reset progress"
			</button>
		</div>
	}
}
