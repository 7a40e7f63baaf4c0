//! Error types for the question graph.

use thiserror::Error;

/// Failures raised while assembling or configuring a question graph.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum GraphError {
	/// No relationship map is configured for the requested user.
	#[error("no relationship map configured for user `{0}`")]
	MissingRelationships(String),

	/// Bundled content or configuration could not be parsed.
	#[error("failed to parse {what}: {source}")]
	Parse {
		/// Which document failed to parse.
		what: &'static str,
		/// The underlying JSON error.
		#[source]
		source: serde_json::Error,
	},

	/// The snapshot store rejected an operation.
	#[error(transparent)]
	Storage(#[from] StorageError),
}

/// Failures of the persisted snapshot store.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum StorageError {
	/// The backing store cannot be reached at all.
	#[error("storage is unavailable: {0}")]
	Unavailable(String),

	/// A read, write or delete was refused by the backend.
	#[error("storage {op} failed for `{key}`: {message}")]
	Operation {
		/// The attempted operation (`get`, `set` or `remove`).
		op: &'static str,
		/// The key involved.
		key: String,
		/// Backend-provided detail.
		message: String,
	},

	/// A snapshot could not be serialized.
	#[error("failed to encode snapshot: {0}")]
	Encode(#[from] serde_json::Error),
}
