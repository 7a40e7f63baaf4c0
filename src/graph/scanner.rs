use std::collections::{HashMap, HashSet, VecDeque};

use log::warn;

use super::index::ParentIndex;
use super::types::Node;

/// Node id to node, for collapsed-flag lookups during a scan.
pub type NodeLookup<'a> = HashMap<&'a str, &'a Node>;

/// Build a lookup table over a node slice.
pub fn node_lookup(nodes: &[Node]) -> NodeLookup<'_> {
	nodes.iter().map(|n| (n.id.as_str(), n)).collect()
}

/// Whether a collapsed ancestor hides `node_id`.
///
/// Walks the parent index breadth-first. A collapsed ancestor blocks its
/// path and is not expanded further. Reaching a root through expanded
/// ancestors only means the node stays visible, so a second, uncollapsed
/// parent keeps a shared child on screen. Returns true iff at least one
/// collapsed ancestor was met and no clean path to a root exists.
///
/// Every ancestor is inspected at most once, so diamonds and (malformed)
/// cycles terminate. An ancestor missing from `nodes` counts as expanded and
/// its own parents are still walked, but it is never drawn: a missing root
/// ends its path without keeping anything visible.
pub fn is_hidden_by_ancestors(
	node_id: &str,
	nodes: &NodeLookup<'_>,
	index: &ParentIndex<'_>,
) -> bool {
	let Some(parents) = index.parents_of(node_id) else {
		return false;
	};

	let mut visited: HashSet<&str> = HashSet::with_capacity(parents.len());
	let mut queue: VecDeque<&str> = VecDeque::with_capacity(parents.len());
	for &parent in parents {
		if visited.insert(parent) {
			queue.push_back(parent);
		}
	}

	let mut blocked = false;
	while let Some(ancestor) = queue.pop_front() {
		let present = match nodes.get(ancestor) {
			Some(node) if node.collapsed => {
				blocked = true;
				continue;
			}
			Some(_) => true,
			None => {
				warn!(
					"ancestor `{ancestor}` of `{node_id}` is not in the snapshot; \
					 treating it as expanded"
				);
				false
			}
		};

		let Some(grandparents) = index.parents_of(ancestor) else {
			if present {
				// Expanded all the way up to a drawn root.
				return false;
			}
			continue;
		};
		for &grandparent in grandparents {
			if visited.insert(grandparent) {
				queue.push_back(grandparent);
			}
		}
	}

	blocked
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::index::build_parent_index;
	use crate::test_support::{collapsed, node, relationships};

	type Map<'a> = &'a [(&'a str, &'a [&'a str])];

	fn scan(target: &str, nodes: &[Node], map: Map<'_>) -> bool {
		let map = relationships(map);
		let index = build_parent_index(&map);
		is_hidden_by_ancestors(target, &node_lookup(nodes), &index)
	}

	#[test]
	fn root_is_never_hidden() {
		let nodes = [collapsed("a"), node("b")];
		assert!(!scan("a", &nodes, &[("a", &["b"])]));
	}

	#[test]
	fn finds_a_distant_collapsed_ancestor() {
		let nodes = [collapsed("a"), node("b"), node("c"), node("d")];
		let map: Map<'_> = &[("a", &["b"]), ("b", &["c"]), ("c", &["d"])];
		assert!(scan("d", &nodes, map));
		assert!(scan("b", &nodes, map));
	}

	#[test]
	fn only_ancestors_count() {
		// `b` is a sibling of `c`, not an ancestor.
		let nodes = [node("a"), collapsed("b"), node("c")];
		assert!(!scan("c", &nodes, &[("a", &["b", "c"])]));
	}

	#[test]
	fn diamond_under_a_collapsed_root() {
		let nodes = [collapsed("a"), node("b"), node("c"), node("d")];
		let map: Map<'_> = &[("a", &["b", "c"]), ("b", &["d"]), ("c", &["d"])];
		assert!(scan("d", &nodes, map));
	}

	#[test]
	fn uncollapsed_second_parent_rescues_a_shared_child() {
		let nodes = [collapsed("a"), node("b"), node("c")];
		let map: Map<'_> = &[("a", &["c"]), ("b", &["c"])];
		assert!(!scan("c", &nodes, map));
	}

	#[test]
	fn rescue_path_must_itself_be_clean() {
		let nodes = [collapsed("a"), node("b"), node("c"), collapsed("z")];
		let map: Map<'_> = &[("a", &["c"]), ("b", &["c"]), ("z", &["b"])];
		assert!(scan("c", &nodes, map));
	}

	#[test]
	fn terminates_on_a_cycle() {
		let nodes = [node("a"), node("b")];
		let map: Map<'_> = &[("a", &["b"]), ("b", &["a"])];
		assert!(!scan("a", &nodes, map));
		assert!(!scan("b", &nodes, map));

		let nodes = [collapsed("a"), node("b")];
		assert!(scan("b", &nodes, map));
		// The walk reaches `a` again through `b`.
		assert!(scan("a", &nodes, map));
	}

	#[test]
	fn cycle_below_a_root() {
		let map: Map<'_> = &[("r", &["a"]), ("a", &["b"]), ("b", &["a"])];
		let nodes = [node("r"), node("a"), node("b")];
		assert!(!scan("b", &nodes, map));

		let nodes = [node("r"), collapsed("a"), node("b")];
		assert!(scan("b", &nodes, map));
		assert!(!scan("a", &nodes, map));
	}

	#[test]
	fn walks_through_missing_ancestors() {
		let nodes = [collapsed("a"), node("c")];
		let map: Map<'_> = &[("a", &["ghost"]), ("ghost", &["c"])];
		assert!(scan("c", &nodes, map));

		let nodes = [node("c")];
		assert!(!scan("c", &nodes, &[("ghost", &["c"])]));
	}

	#[test]
	fn missing_co_parent_does_not_rescue() {
		let map: Map<'_> = &[("a", &["c"]), ("ghost", &["c"])];
		assert!(scan("c", &[collapsed("a"), node("c")], map));
		assert!(!scan("c", &[node("a"), node("c")], map));

		// A missing ancestor still passes a drawn root through.
		let map: Map<'_> = &[("a", &["c"]), ("r", &["ghost"]), ("ghost", &["c"])];
		assert!(!scan("c", &[collapsed("a"), node("r"), node("c")], map));
	}
}
