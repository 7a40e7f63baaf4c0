use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::Position;

/// Static, read-only content of one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionContent {
	/// Node id the question appears under.
	pub id: String,
	/// Default layout position.
	pub position: Position,
	/// The full question.
	pub text: String,
	/// Title shown on the node.
	pub short_title: String,
	/// Free-form level, e.g. `easy`.
	#[serde(default)]
	pub difficulty: Option<String>,
	/// Subject area.
	#[serde(default)]
	pub topic: Option<String>,
	/// Longer notes shown in the details panel.
	#[serde(default)]
	pub description: Option<String>,
	/// Skills the question exercises.
	#[serde(default, rename = "skills_tested")]
	pub skills_tested: Vec<String>,
}

/// Lookup table of question content keyed by id, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContentLibrary {
	questions: IndexMap<String, QuestionContent>,
}

impl ContentLibrary {
	/// Content for `id`, if any.
	pub fn get(&self, id: &str) -> Option<&QuestionContent> {
		self.questions.get(id)
	}
}

impl FromIterator<QuestionContent> for ContentLibrary {
	fn from_iter<I: IntoIterator<Item = QuestionContent>>(iter: I) -> Self {
		Self {
			questions: iter.into_iter().map(|q| (q.id.clone(), q)).collect(),
		}
	}
}
