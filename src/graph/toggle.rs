use log::{debug, error, warn};

use super::types::{Node, RelationshipMap, Snapshot, ToggleEvent};
use super::visibility::calculate_visibility;

/// Apply a collapse/expand request and recompute visibility for the whole snapshot.
///
/// Only the target's `collapsed` flag changes; every `hidden` flag is derived
/// again from scratch. Without a relationship map the snapshot is returned as is.
pub fn toggle_collapse(
	snapshot: &Snapshot,
	relationships: Option<&RelationshipMap>,
	event: &ToggleEvent,
) -> Snapshot {
	let Some(relationships) = relationships else {
		error!(
			"no relationship map for the active graph; ignoring toggle of `{}`",
			event.node_id
		);
		return snapshot.clone();
	};

	if snapshot.node(&event.node_id).is_none() {
		warn!("toggle for unknown node `{}`", event.node_id);
	}

	let nodes: Vec<Node> = snapshot
		.nodes
		.iter()
		.map(|n| {
			if n.id == event.node_id {
				Node {
					collapsed: event.collapsed,
					..n.clone()
				}
			} else {
				n.clone()
			}
		})
		.collect();

	let next = calculate_visibility(&nodes, &snapshot.edges, relationships);
	debug!(
		"{} `{}`: {} of {} nodes hidden",
		if event.collapsed { "collapsed" } else { "expanded" },
		event.node_id,
		next.hidden_ids().len(),
		next.nodes.len()
	);
	next
}
