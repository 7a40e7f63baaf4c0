use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;
use log::{debug, warn};

use super::types::{Edge, Node, RelationshipMap, Snapshot};
use super::visibility::calculate_visibility;
use crate::content::Catalog;
use crate::error::GraphError;
use crate::storage::{KeyValueStore, load_snapshot};

/// Every id named by a relationship map, keys and values, in first-seen order.
pub fn relevant_ids(relationships: &RelationshipMap) -> IndexSet<&str> {
	let mut ids = IndexSet::new();
	for (parent, children) in relationships {
		ids.insert(parent.as_str());
		ids.extend(children.iter().map(String::as_str));
	}
	ids
}

/// Assemble the user's snapshot from static content, their relationship map
/// and whatever collapsed state was saved for them.
///
/// Ids without content are skipped with a warning, along with every edge
/// touching them. Unreadable saved state counts as none. Positions and
/// collapsed flags are taken from saved state; `hidden` is always recomputed.
pub fn build_user_graph<S: KeyValueStore + ?Sized>(
	user_id: &str,
	catalog: &Catalog,
	store: &S,
) -> Result<Snapshot, GraphError> {
	let relationships = catalog
		.users
		.relationships(user_id)
		.ok_or_else(|| GraphError::MissingRelationships(user_id.to_string()))?;

	let saved = load_snapshot(store, user_id);
	let saved_nodes: HashMap<&str, &Node> = saved
		.iter()
		.flat_map(|s| s.nodes.iter())
		.map(|n| (n.id.as_str(), n))
		.collect();

	let mut nodes = Vec::new();
	for id in relevant_ids(relationships) {
		let Some(question) = catalog.content.get(id) else {
			warn!("no content for question `{id}` in the graph of `{user_id}`; skipping it");
			continue;
		};
		let previous = saved_nodes.get(id);
		nodes.push(Node {
			id: id.to_string(),
			position: previous.map_or(question.position, |n| n.position),
			title: question.short_title.clone(),
			collapsed: previous.is_some_and(|n| n.collapsed),
			children: relationships.get(id).cloned().unwrap_or_default(),
			hidden: false,
		});
	}

	let present: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let mut edge_ids = HashSet::new();
	let mut edges = Vec::new();
	for (parent, children) in relationships {
		for child in children {
			if !present.contains(parent.as_str()) || !present.contains(child.as_str()) {
				continue;
			}
			let edge = Edge::between(parent.as_str(), child.as_str());
			if edge_ids.insert(edge.id.clone()) {
				edges.push(edge);
			}
		}
	}

	debug!(
		"assembled graph for `{user_id}`: {} nodes, {} edges, saved state: {}",
		nodes.len(),
		edges.len(),
		saved.is_some()
	);
	Ok(calculate_visibility(&nodes, &edges, relationships))
}
