//! The active user's graph and the events that change it.

use log::{error, info, warn};

use crate::content::Catalog;
use crate::error::GraphError;
use crate::graph::{Position, Snapshot, ToggleEvent, build_user_graph, toggle_collapse};
use crate::storage::{CURRENT_USER_KEY, KeyValueStore, clear_snapshot, save_snapshot};

/// A request from the rendering layer.
#[derive(Clone, Debug, PartialEq)]
pub enum GraphEvent {
	/// Switch to another user and assemble their graph.
	SelectUser(String),
	/// Collapse or expand a node.
	Toggle(ToggleEvent),
	/// A node was dragged to a new position.
	MoveNode {
		/// The dragged node.
		node_id: String,
		/// Where it was dropped.
		position: Position,
	},
	/// Forget the active user's saved progress and start over.
	Reset,
}

/// Outcome of the last assembly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionStatus {
	/// No user selected yet.
	#[default]
	Idle,
	/// Assembling a graph; nothing is persisted in this state.
	Loading,
	/// The snapshot reflects the active user's configuration.
	Ready,
	/// The active user has no relationship map; the snapshot is empty.
	MissingRelationships(String),
}

/// Explicit state for one viewer: active user, current snapshot and the store
/// mirroring it.
#[derive(Debug)]
pub struct GraphSession<S> {
	catalog: Catalog,
	store: S,
	active_user: Option<String>,
	snapshot: Snapshot,
	status: SessionStatus,
}

impl<S: KeyValueStore> GraphSession<S> {
	/// A session with no active user.
	pub fn new(catalog: Catalog, store: S) -> Self {
		Self {
			catalog,
			store,
			active_user: None,
			snapshot: Snapshot::default(),
			status: SessionStatus::Idle,
		}
	}

	/// The current snapshot.
	pub fn snapshot(&self) -> &Snapshot {
		&self.snapshot
	}

	/// Id of the user whose graph is shown.
	pub fn active_user(&self) -> Option<&str> {
		self.active_user.as_deref()
	}

	/// Outcome of the last assembly.
	pub fn status(&self) -> &SessionStatus {
		&self.status
	}

	/// The backing store.
	pub fn store(&self) -> &S {
		&self.store
	}

	/// A message for the status banner, if the session is in an error state.
	pub fn status_message(&self) -> Option<String> {
		match &self.status {
			SessionStatus::MissingRelationships(user) => {
				Some(GraphError::MissingRelationships(user.clone()).to_string())
			}
			_ => None,
		}
	}

	/// The user to open on start-up: the remembered one if still configured,
	/// else the first configured user.
	pub fn initial_user(&self) -> Option<String> {
		match self.store.get(CURRENT_USER_KEY) {
			Ok(Some(user)) if self.catalog.users.contains(&user) => return Some(user),
			Ok(Some(user)) => warn!("remembered user `{user}` is no longer configured"),
			Ok(None) => {}
			Err(err) => warn!("could not read the remembered user: {err}"),
		}
		self.catalog.users.first().map(|u| u.id.clone())
	}

	/// Apply one event from the rendering layer.
	pub fn dispatch(&mut self, event: GraphEvent) {
		match event {
			GraphEvent::SelectUser(user) => self.select_user(&user),
			GraphEvent::Toggle(toggle) => self.toggle(&toggle),
			GraphEvent::MoveNode { node_id, position } => self.move_node(&node_id, position),
			GraphEvent::Reset => self.reset(),
		}
	}

	/// Make `user_id` active and assemble their graph.
	pub fn select_user(&mut self, user_id: &str) {
		info!("opening the question graph of `{user_id}`");
		self.active_user = Some(user_id.to_string());
		if let Err(err) = self.store.set(CURRENT_USER_KEY, user_id) {
			warn!("could not remember the selected user: {err}");
		}

		self.status = SessionStatus::Loading;
		match build_user_graph(user_id, &self.catalog, &self.store) {
			Ok(snapshot) => {
				self.snapshot = snapshot;
				self.status = SessionStatus::Ready;
			}
			Err(err) => {
				error!("{err}");
				self.snapshot = Snapshot::default();
				self.status = SessionStatus::MissingRelationships(user_id.to_string());
			}
		}
		self.persist();
	}

	/// Collapse or expand one node; every hidden flag is recomputed.
	pub fn toggle(&mut self, event: &ToggleEvent) {
		let relationships = self
			.active_user
			.as_deref()
			.and_then(|user| self.catalog.users.relationships(user));
		self.snapshot = toggle_collapse(&self.snapshot, relationships, event);
		self.persist();
	}

	/// Record a dragged node's new position.
	pub fn move_node(&mut self, node_id: &str, position: Position) {
		let Some(node) = self.snapshot.nodes.iter_mut().find(|n| n.id == node_id) else {
			warn!("move for unknown node `{node_id}`");
			return;
		};
		node.position = position;
		self.persist();
	}

	/// Drop the active user's saved state and assemble their graph afresh.
	pub fn reset(&mut self) {
		let Some(user) = self.active_user.clone() else {
			warn!("reset requested with no active user");
			return;
		};
		info!("resetting progress of `{user}`");
		if let Err(err) = clear_snapshot(&self.store, &user) {
			error!("could not clear saved progress of `{user}`: {err}");
		}
		self.select_user(&user);
	}

	fn persist(&self) {
		if self.status != SessionStatus::Ready {
			return;
		}
		let Some(user) = self.active_user.as_deref() else {
			return;
		};
		if let Err(err) = save_snapshot(&self.store, user, &self.snapshot) {
			error!("could not save progress of `{user}`: {err}");
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::StorageError;
	use crate::storage::{MemoryStore, load_snapshot, snapshot_key};
	use pretty_assertions::assert_eq;

	fn fixture() -> Catalog {
		let questions = r#"[
			{ "id": "a", "position": { "x": 0, "y": 0 }, "text": "A?", "shortTitle": "A" },
			{ "id": "b", "position": { "x": 0, "y": 0 }, "text": "B?", "shortTitle": "B" },
			{ "id": "c", "position": { "x": 0, "y": 0 }, "text": "C?", "shortTitle": "C" },
			{ "id": "d", "position": { "x": 0, "y": 0 }, "text": "D?", "shortTitle": "D" }
		]"#;
		let users = r#"[
			{ "id": "u1", "name": "One", "relationships": { "a": ["b", "c"], "b": ["d"] } },
			{ "id": "u2", "name": "Two", "relationships": { "a": ["d"] } },
			{ "id": "u3", "name": "Unconfigured" }
		]"#;
		Catalog::from_json(questions, users).unwrap()
	}

	/// Every operation fails.
	struct BrokenStore;

	impl KeyValueStore for BrokenStore {
		fn get(&self, _: &str) -> Result<Option<String>, StorageError> {
			Err(StorageError::Unavailable("broken".into()))
		}
		fn set(&self, _: &str, _: &str) -> Result<(), StorageError> {
			Err(StorageError::Unavailable("broken".into()))
		}
		fn remove(&self, _: &str) -> Result<(), StorageError> {
			Err(StorageError::Unavailable("broken".into()))
		}
	}

	#[test]
	fn selecting_a_user_assembles_and_persists() {
		let mut session = GraphSession::new(fixture(), MemoryStore::new());
		session.dispatch(GraphEvent::SelectUser("u1".into()));

		assert_eq!(session.status(), &SessionStatus::Ready);
		assert_eq!(session.snapshot().nodes.len(), 4);
		assert_eq!(load_snapshot(session.store(), "u1").as_ref(), Some(session.snapshot()));
		assert_eq!(session.store().get(CURRENT_USER_KEY).unwrap().as_deref(), Some("u1"));
	}

	#[test]
	fn toggles_persist_and_survive_a_user_switch() {
		let mut session = GraphSession::new(fixture(), MemoryStore::new());
		session.select_user("u1");
		session.dispatch(GraphEvent::Toggle(ToggleEvent::new("b", true)));
		session.dispatch(GraphEvent::Toggle(ToggleEvent::new("a", true)));
		session.dispatch(GraphEvent::Toggle(ToggleEvent::new("a", false)));
		let before = session.snapshot().clone();
		assert_eq!(before.hidden_ids(), vec!["d"]);

		session.select_user("u2");
		assert_eq!(session.snapshot().nodes.len(), 2);
		session.select_user("u1");

		assert_eq!(session.snapshot(), &before);
	}

	#[test]
	fn unconfigured_user_yields_an_empty_graph() {
		let mut session = GraphSession::new(fixture(), MemoryStore::new());
		session.select_user("u3");

		assert!(session.snapshot().is_empty());
		assert_eq!(session.status(), &SessionStatus::MissingRelationships("u3".into()));
		assert_eq!(
			session.status_message().as_deref(),
			Some("no relationship map configured for user `u3`")
		);
		assert!(!session.store().contains(&snapshot_key("u3")));

		// Toggling is a no-op without a relationship map.
		session.toggle(&ToggleEvent::new("a", true));
		assert!(session.snapshot().is_empty());
	}

	#[test]
	fn reset_restores_a_fresh_graph() {
		let mut session = GraphSession::new(fixture(), MemoryStore::new());
		session.select_user("u1");
		session.toggle(&ToggleEvent::new("a", true));
		session.move_node("a", Position::new(300.0, 40.0));

		session.dispatch(GraphEvent::Reset);
		let node = session.snapshot().node("a").unwrap();
		assert!(!node.collapsed);
		assert_eq!(node.position, Position::default());
		assert!(session.snapshot().hidden_ids().is_empty());
	}

	#[test]
	fn moved_nodes_keep_their_position() {
		let mut session = GraphSession::new(fixture(), MemoryStore::new());
		session.select_user("u1");
		session.dispatch(GraphEvent::MoveNode {
			node_id: "c".into(),
			position: Position::new(10.0, 20.0),
		});
		session.select_user("u1");
		assert_eq!(session.snapshot().node("c").unwrap().position, Position::new(10.0, 20.0));
	}

	#[test]
	fn storage_failures_never_block_changes() {
		let mut session = GraphSession::new(fixture(), BrokenStore);
		assert_eq!(session.initial_user().as_deref(), Some("u1"));

		session.select_user("u1");
		session.toggle(&ToggleEvent::new("a", true));
		assert_eq!(session.snapshot().hidden_ids(), vec!["b", "c", "d"]);
		session.reset();
		assert!(session.snapshot().hidden_ids().is_empty());
	}

	#[test]
	fn initial_user_prefers_a_remembered_configured_user() {
		let store = MemoryStore::new();
		store.set(CURRENT_USER_KEY, "u2").unwrap();
		assert_eq!(GraphSession::new(fixture(), &store).initial_user().as_deref(), Some("u2"));

		store.set(CURRENT_USER_KEY, "gone").unwrap();
		assert_eq!(GraphSession::new(fixture(), &store).initial_user().as_deref(), Some("u1"));
	}
}
