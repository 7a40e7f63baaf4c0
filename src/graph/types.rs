use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Parent id to ordered child ids. The authoritative structure for ancestor lookups.
pub type RelationshipMap = IndexMap<String, Vec<String>>;

/// Layout coordinates. Opaque to the visibility core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Left edge, in graph units.
	pub x: f64,
	/// Top edge, in graph units.
	pub y: f64,
}

impl Position {
	/// A point at `(x, y)`.
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// A question in the snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique within a snapshot.
	pub id: String,
	/// Passed through untouched by the visibility core.
	pub position: Position,
	/// Short display title.
	#[serde(default)]
	pub title: String,
	/// Set by the user; hides every descendant.
	#[serde(default)]
	pub collapsed: bool,
	/// Declared fan-out, used for the collapse button and edge construction.
	#[serde(default)]
	pub children: Vec<String>,
	/// Derived by the visibility calculator. Never authoritative when loaded.
	#[serde(default)]
	pub hidden: bool,
}

impl Node {
	/// An expanded, visible node with no children.
	pub fn new(id: impl Into<String>, position: Position) -> Self {
		Self {
			id: id.into(),
			position,
			title: String::new(),
			collapsed: false,
			children: Vec::new(),
			hidden: false,
		}
	}
}

/// How the rendering layer draws an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
	/// Cubic curve.
	Bezier,
	/// Orthogonal segments with rounded corners.
	#[default]
	SmoothStep,
	/// Orthogonal segments.
	Step,
	/// Direct line.
	Straight,
}

/// A directed parent to child connection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// `{source}-{target}`.
	pub id: String,
	/// Parent node id.
	pub source: String,
	/// Child node id.
	pub target: String,
	/// Rendering hint; the renderer may override it.
	#[serde(default, rename = "type")]
	pub style: EdgeStyle,
	/// True iff either endpoint is hidden. Derived like [`Node::hidden`].
	#[serde(default)]
	pub hidden: bool,
}

impl Edge {
	/// Edge ids follow the `{source}-{target}` convention.
	pub fn between(source: impl Into<String>, target: impl Into<String>) -> Self {
		let (source, target) = (source.into(), target.into());
		Self {
			id: format!("{source}-{target}"),
			source,
			target,
			style: EdgeStyle::default(),
			hidden: false,
		}
	}
}

/// The full `(nodes, edges)` pair for the active scope.
///
/// Serialized as `{ "nodes": [...], "edges": [...] }` for persistence.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
	/// Every node of the scope, hidden or not.
	pub nodes: Vec<Node>,
	/// Every edge between two present nodes.
	pub edges: Vec<Edge>,
}

impl Snapshot {
	/// Look a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether any declared child of `node` made it into the snapshot. Only
	/// those nodes get a collapse/expand affordance.
	pub fn has_present_children(&self, node: &Node) -> bool {
		node.children.iter().any(|child| self.node(child).is_some())
	}

	/// True when the snapshot has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Ids of every hidden node, in node order.
	pub fn hidden_ids(&self) -> Vec<&str> {
		self.nodes
			.iter()
			.filter(|n| n.hidden)
			.map(|n| n.id.as_str())
			.collect()
	}
}

/// A `(node id, desired collapsed)` request from the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToggleEvent {
	/// The node whose flag changes.
	pub node_id: String,
	/// The desired flag.
	pub collapsed: bool,
}

impl ToggleEvent {
	/// Request `collapsed` for `node_id`.
	pub fn new(node_id: impl Into<String>, collapsed: bool) -> Self {
		Self {
			node_id: node_id.into(),
			collapsed,
		}
	}
}
