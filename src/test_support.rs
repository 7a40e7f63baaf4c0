//! Fixtures shared by unit tests.

use crate::content::{Catalog, ContentLibrary, QuestionContent, UserDirectory, UserProfile};
use crate::graph::{Edge, Node, Position, RelationshipMap, Snapshot, calculate_visibility};

pub(crate) fn node(id: &str) -> Node {
	Node::new(id, Position::default())
}

pub(crate) fn collapsed(id: &str) -> Node {
	Node {
		collapsed: true,
		..node(id)
	}
}

pub(crate) fn relationships(pairs: &[(&str, &[&str])]) -> RelationshipMap {
	pairs
		.iter()
		.map(|(parent, children)| {
			(
				parent.to_string(),
				children.iter().map(|c| c.to_string()).collect(),
			)
		})
		.collect()
}

/// Attach children and edges from `map`, then compute visibility.
pub(crate) fn snapshot_for(nodes: Vec<Node>, map: &RelationshipMap) -> Snapshot {
	let nodes: Vec<Node> = nodes
		.into_iter()
		.map(|n| Node {
			children: map.get(&n.id).cloned().unwrap_or_default(),
			..n
		})
		.collect();
	let edges: Vec<Edge> = map
		.iter()
		.flat_map(|(parent, children)| children.iter().map(move |c| (parent, c)))
		.filter(|(p, c)| nodes.iter().any(|n| &n.id == *p) && nodes.iter().any(|n| &n.id == *c))
		.map(|(p, c)| Edge::between(p.as_str(), c.as_str()))
		.collect();
	calculate_visibility(&nodes, &edges, map)
}

pub(crate) fn question(id: &str) -> QuestionContent {
	QuestionContent {
		id: id.to_string(),
		position: Position::new(0.0, 0.0),
		text: format!("Question {id}?"),
		short_title: id.to_uppercase(),
		difficulty: None,
		topic: None,
		description: None,
		skills_tested: Vec::new(),
	}
}

/// Content for `questions`, plus one user per `(user id, relationship pairs)`.
pub(crate) fn catalog(questions: &[&str], users: &[(&str, &[(&str, &[&str])])]) -> Catalog {
	let content: ContentLibrary = questions.iter().map(|id| question(id)).collect();
	let users = users
		.iter()
		.map(|(id, pairs)| UserProfile {
			id: id.to_string(),
			name: id.to_uppercase(),
			relationships: Some(relationships(pairs)),
		})
		.collect();
	Catalog::new(content, UserDirectory::new(users))
}
