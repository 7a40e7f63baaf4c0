//! Collapse/expand visibility over a question DAG.
//!
//! A node is hidden when a collapsed ancestor cuts it off: at least one
//! ancestor is collapsed and no root reaches it through expanded ancestors
//! only. The flag is always recomputed over the whole snapshot, never patched.

mod builder;
mod index;
mod scanner;
mod toggle;
mod types;
mod visibility;

pub use builder::{build_user_graph, relevant_ids};
pub use index::{ParentIndex, build_parent_index};
pub use scanner::{NodeLookup, is_hidden_by_ancestors, node_lookup};
pub use toggle::toggle_collapse;
pub use types::{Edge, EdgeStyle, Node, Position, RelationshipMap, Snapshot, ToggleEvent};
pub use visibility::{calculate_visibility, hidden_node_ids};
