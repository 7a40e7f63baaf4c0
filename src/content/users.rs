use serde::{Deserialize, Serialize};

use crate::graph::RelationshipMap;

/// A learner and the slice of the question graph assigned to them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
	/// Stable identifier, also the storage key suffix.
	pub id: String,
	/// Display name.
	pub name: String,
	/// This user's sub-DAG. `None` is a configuration error at assembly time.
	#[serde(default)]
	pub relationships: Option<RelationshipMap>,
}

/// Id and display name, for the user switcher.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserSummary {
	/// User id.
	pub id: String,
	/// Display name.
	pub name: String,
}

/// Every configured user, in configuration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserDirectory {
	users: Vec<UserProfile>,
}

impl UserDirectory {
	/// Wrap users in configuration order.
	pub fn new(users: Vec<UserProfile>) -> Self {
		Self { users }
	}

	/// Whether `user_id` is configured at all.
	pub fn contains(&self, user_id: &str) -> bool {
		self.users.iter().any(|u| u.id == user_id)
	}

	/// The user's relationship map, or `None` if the user or their map is unknown.
	pub fn relationships(&self, user_id: &str) -> Option<&RelationshipMap> {
		self.users
			.iter()
			.find(|u| u.id == user_id)
			.and_then(|u| u.relationships.as_ref())
	}

	/// The default user.
	pub fn first(&self) -> Option<&UserProfile> {
		self.users.first()
	}

	/// Ids and names of every user.
	pub fn summaries(&self) -> Vec<UserSummary> {
		self.users
			.iter()
			.map(|u| UserSummary {
				id: u.id.clone(),
				name: u.name.clone(),
			})
			.collect()
	}
}
