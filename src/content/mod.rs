//! Static question content and per-user relationship configuration.
//!
//! Both documents are bundled into the binary and treated as read-only.

mod questions;
mod users;

pub use questions::{ContentLibrary, QuestionContent};
pub use users::{UserDirectory, UserProfile, UserSummary};

use crate::error::GraphError;

const QUESTIONS_JSON: &str = include_str!("../../data/questions.json");
const USERS_JSON: &str = include_str!("../../data/users.json");

/// Everything the graph builder reads but never writes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
	/// Question content by id.
	pub content: ContentLibrary,
	/// Users and their relationship maps.
	pub users: UserDirectory,
}

impl Catalog {
	/// Combine content and users.
	pub fn new(content: ContentLibrary, users: UserDirectory) -> Self {
		Self { content, users }
	}

	/// The catalog shipped with the app.
	pub fn embedded() -> Result<Self, GraphError> {
		Self::from_json(QUESTIONS_JSON, USERS_JSON)
	}

	/// Parse a question array and a user array.
	pub fn from_json(questions: &str, users: &str) -> Result<Self, GraphError> {
		let questions: Vec<QuestionContent> =
			serde_json::from_str(questions).map_err(|source| GraphError::Parse {
				what: "question content",
				source,
			})?;
		let users: Vec<UserProfile> =
			serde_json::from_str(users).map_err(|source| GraphError::Parse {
				what: "user configuration",
				source,
			})?;
		Ok(Self::new(questions.into_iter().collect(), UserDirectory::new(users)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn embedded_catalog_parses() {
		let catalog = Catalog::embedded().unwrap();
		assert!(catalog.content.get("q1").is_some());
		let first = catalog.users.first().unwrap();
		assert!(catalog.users.relationships(&first.id).is_some());
	}

	#[test]
	fn embedded_relationships_reference_known_questions() {
		let catalog = Catalog::embedded().unwrap();
		for user in catalog.users.summaries() {
			let Some(map) = catalog.users.relationships(&user.id) else {
				continue;
			};
			for (parent, children) in map {
				assert!(catalog.content.get(parent).is_some(), "{parent} for {}", user.id);
				for child in children {
					assert!(catalog.content.get(child).is_some(), "{child} for {}", user.id);
				}
			}
		}
	}

	#[test]
	fn malformed_json_names_the_document() {
		let err = Catalog::from_json("[]", "{").unwrap_err();
		assert!(err.to_string().starts_with("failed to parse user configuration"));
	}
}
