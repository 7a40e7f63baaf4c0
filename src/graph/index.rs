use std::collections::HashMap;

use super::types::RelationshipMap;

/// Child id to every parent that declares it, borrowed from a [`RelationshipMap`].
#[derive(Clone, Debug, Default)]
pub struct ParentIndex<'a> {
	parents: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> ParentIndex<'a> {
	/// Parents of `id`, or `None` for a root.
	pub fn parents_of(&self, id: &str) -> Option<&[&'a str]> {
		self.parents.get(id).map(Vec::as_slice)
	}
}

/// Reverse a parent -> children map into child -> parents.
///
/// Parents are listed in order of first discovery.
pub fn build_parent_index(relationships: &RelationshipMap) -> ParentIndex<'_> {
	let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
	for (parent, children) in relationships {
		for child in children {
			parents
				.entry(child.as_str())
				.or_default()
				.push(parent.as_str());
		}
	}
	ParentIndex { parents }
}
