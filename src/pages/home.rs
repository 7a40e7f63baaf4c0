use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;

use crate::components::question_details::QuestionDetails;
use crate::components::question_graph::QuestionGraphCanvas;
use crate::components::user_switcher::UserSwitcher;
use crate::content::{Catalog, ContentLibrary};
use crate::graph::Snapshot;
use crate::session::{GraphEvent, GraphSession};
use crate::storage::BrowserStorage;

/// Default Home Page
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			{Catalog::embedded().map(|catalog| view! { <QuestionWorkspace catalog /> })}
		</ErrorBoundary>
	}
}

/// Owns the session and drains the event queue the components write to.
#[component]
fn QuestionWorkspace(catalog: Catalog) -> impl IntoView {
	let users = catalog.users.summaries();
	let content = StoredValue::new(catalog.content.clone());
	let session = Rc::new(RefCell::new(GraphSession::new(catalog, BrowserStorage::local())));

	let snapshot = RwSignal::new(Snapshot::default());
	let active_user = RwSignal::new(None::<String>);
	let status = RwSignal::new(None::<String>);
	let hovered = RwSignal::new(None::<String>);
	let initial: Vec<GraphEvent> = session
		.borrow()
		.initial_user()
		.map(GraphEvent::SelectUser)
		.into_iter()
		.collect();
	let events = RwSignal::new(initial);

	Effect::new(move |_| {
		events.track();
		let mut pending = Vec::new();
		events.update_untracked(|queue| pending = std::mem::take(queue));
		if pending.is_empty() {
			return;
		}

		let mut session = session.borrow_mut();
		for event in pending {
			session.dispatch(event);
		}
		snapshot.set(session.snapshot().clone());
		active_user.set(session.active_user().map(str::to_string));
		status.set(session.status_message());
	});

	let hovered_question = Signal::derive(move || {
		hovered
			.get()
			.and_then(|id| content.with_value(|c: &ContentLibrary| c.get(&id).cloned()))
	});

	view! {
		<div class="fullscreen-graph">
			<QuestionGraphCanvas snapshot graph_key=active_user events hovered />
			<div class="graph-overlay">
				<h1>"Question Tree"</h1>
				<p class="subtitle">
					"Collapse a question to hide everything below it. Drag nodes to rearrange. \
					 Scroll to zoom. Drag background to pan."
				</p>
				<UserSwitcher users active_user events />
				{move || {
					status
						.get()
						.map(|message| view! { <div class="status-banner">{message}</div> })
				}}
			</div>
			<QuestionDetails question=hovered_question />
		</div>
	}
}
