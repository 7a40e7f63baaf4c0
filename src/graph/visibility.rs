use std::collections::HashSet;

use super::index::build_parent_index;
use super::scanner::{is_hidden_by_ancestors, node_lookup};
use super::types::{Edge, Node, RelationshipMap, Snapshot};

/// Ids of every node a collapsed ancestor hides.
pub fn hidden_node_ids<'a>(nodes: &'a [Node], relationships: &RelationshipMap) -> HashSet<&'a str> {
	let index = build_parent_index(relationships);
	let lookup = node_lookup(nodes);
	nodes
		.iter()
		.map(|n| n.id.as_str())
		.filter(|id| is_hidden_by_ancestors(id, &lookup, &index))
		.collect()
}

/// Recompute every `hidden` flag from scratch.
///
/// Returns fresh sequences; all other node and edge fields are copied as is.
/// An edge is hidden iff either endpoint is.
pub fn calculate_visibility(
	nodes: &[Node],
	edges: &[Edge],
	relationships: &RelationshipMap,
) -> Snapshot {
	let hidden = hidden_node_ids(nodes, relationships);

	let nodes = nodes
		.iter()
		.map(|n| Node {
			hidden: hidden.contains(n.id.as_str()),
			..n.clone()
		})
		.collect();
	let edges = edges
		.iter()
		.map(|e| Edge {
			hidden: hidden.contains(e.source.as_str()) || hidden.contains(e.target.as_str()),
			..e.clone()
		})
		.collect();

	Snapshot { nodes, edges }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_support::{collapsed, node, relationships, snapshot_for};
	use pretty_assertions::assert_eq;

	fn recompute(snapshot: &Snapshot, map: &RelationshipMap) -> Snapshot {
		calculate_visibility(&snapshot.nodes, &snapshot.edges, map)
	}

	#[test]
	fn collapsing_hides_direct_children() {
		let map = relationships(&[("a", &["b"])]);
		let mut snapshot = snapshot_for(vec![collapsed("a"), node("b")], &map);

		snapshot = recompute(&snapshot, &map);
		assert_eq!(snapshot.hidden_ids(), vec!["b"]);

		snapshot.nodes[0].collapsed = false;
		snapshot = recompute(&snapshot, &map);
		assert!(snapshot.hidden_ids().is_empty());
	}

	#[test]
	fn hiding_is_transitive() {
		let map = relationships(&[("a", &["b"]), ("b", &["c"])]);
		let snapshot = snapshot_for(vec![collapsed("a"), node("b"), node("c")], &map);
		assert_eq!(recompute(&snapshot, &map).hidden_ids(), vec!["b", "c"]);
	}

	#[test]
	fn shared_child_stays_visible_through_an_expanded_parent() {
		let map = relationships(&[("a", &["c"]), ("b", &["c"])]);
		let snapshot = snapshot_for(vec![collapsed("a"), node("b"), node("c")], &map);
		assert!(recompute(&snapshot, &map).hidden_ids().is_empty());

		let snapshot = snapshot_for(vec![collapsed("a"), collapsed("b"), node("c")], &map);
		assert_eq!(recompute(&snapshot, &map).hidden_ids(), vec!["c"]);
	}

	#[test]
	fn edges_mirror_their_endpoints() {
		let map = relationships(&[("a", &["b", "c"]), ("b", &["d"]), ("x", &["c"])]);
		let nodes = vec![node("a"), collapsed("b"), node("c"), node("d"), collapsed("x")];
		let result = recompute(&snapshot_for(nodes, &map), &map);

		for edge in &result.edges {
			let source = result.node(&edge.source).map(|n| n.hidden);
			let target = result.node(&edge.target).map(|n| n.hidden);
			assert_eq!(
				edge.hidden,
				source == Some(true) || target == Some(true),
				"edge {}",
				edge.id
			);
		}
		// `c` keeps its expanded root parent `a`.
		assert_eq!(result.hidden_ids(), vec!["d"]);
	}

	#[test]
	fn recomputation_is_idempotent() {
		let map = relationships(&[("a", &["b", "c"]), ("c", &["d"]), ("b", &["d"])]);
		let snapshot = snapshot_for(vec![node("a"), collapsed("b"), node("c"), node("d")], &map);

		let once = recompute(&snapshot, &map);
		let twice = recompute(&once, &map);
		assert_eq!(once, twice);
	}

	#[test]
	fn preserves_collapsed_flags_and_children() {
		let map = relationships(&[("a", &["b"])]);
		let snapshot = snapshot_for(vec![collapsed("a"), node("b")], &map);
		let result = recompute(&snapshot, &map);

		assert!(result.nodes[0].collapsed);
		assert_eq!(result.nodes[0].children, vec!["b".to_string()]);
		assert_eq!(result.nodes[0].position, snapshot.nodes[0].position);
	}

	#[test]
	fn stale_hidden_flags_are_overwritten() {
		let map = relationships(&[("a", &["b"])]);
		let mut snapshot = snapshot_for(vec![node("a"), node("b")], &map);
		snapshot.nodes[0].hidden = true;
		snapshot.edges[0].hidden = true;

		let result = recompute(&snapshot, &map);
		assert!(result.hidden_ids().is_empty());
		assert!(!result.edges[0].hidden);
	}
}
