//! Best-effort persistence of per-user snapshots.
//!
//! In-memory state is always the authority; every failure here is logged by
//! the caller and never rolls back a change.

use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;

use crate::error::StorageError;
use crate::graph::Snapshot;

/// Key holding the last selected user id.
pub const CURRENT_USER_KEY: &str = "currentUser";

/// Key holding a user's persisted snapshot.
pub fn snapshot_key(user_id: &str) -> String {
	format!("userGraphData_{user_id}")
}

/// A string key-value store, such as the browser's `localStorage`.
pub trait KeyValueStore {
	/// The value under `key`, or `None` if unset.
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
	/// Store `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
	/// Delete `key`. Deleting a missing key is not an error.
	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Load a user's snapshot. Missing, unreadable or corrupt state reads as `None`.
pub fn load_snapshot<S: KeyValueStore + ?Sized>(store: &S, user_id: &str) -> Option<Snapshot> {
	let key = snapshot_key(user_id);
	let raw = match store.get(&key) {
		Ok(Some(raw)) => raw,
		Ok(None) => return None,
		Err(err) => {
			warn!("could not read saved graph for `{user_id}`, starting fresh: {err}");
			return None;
		}
	};
	match serde_json::from_str(&raw) {
		Ok(snapshot) => Some(snapshot),
		Err(err) => {
			warn!("saved graph for `{user_id}` is corrupt, starting fresh: {err}");
			None
		}
	}
}

/// Write a user's snapshot as JSON.
pub fn save_snapshot<S: KeyValueStore + ?Sized>(
	store: &S,
	user_id: &str,
	snapshot: &Snapshot,
) -> Result<(), StorageError> {
	let json = serde_json::to_string(snapshot)?;
	store.set(&snapshot_key(user_id), &json)
}

/// Forget a user's snapshot.
pub fn clear_snapshot<S: KeyValueStore + ?Sized>(
	store: &S,
	user_id: &str,
) -> Result<(), StorageError> {
	store.remove(&snapshot_key(user_id))
}

/// `window.localStorage`. Every call fails with [`StorageError::Unavailable`]
/// when the browser refuses access.
#[derive(Clone, Debug)]
pub struct BrowserStorage {
	storage: Option<web_sys::Storage>,
}

impl BrowserStorage {
	/// Connect to `window.localStorage`, if the browser allows it.
	pub fn local() -> Self {
		let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
		if storage.is_none() {
			warn!("localStorage is unavailable; progress will not be saved");
		}
		Self { storage }
	}

	fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
		self.storage
			.as_ref()
			.ok_or_else(|| StorageError::Unavailable("localStorage is not accessible".into()))
	}
}

fn js_failure(op: &'static str, key: &str, err: wasm_bindgen::JsValue) -> StorageError {
	StorageError::Operation {
		op,
		key: key.to_string(),
		message: format!("{err:?}"),
	}
}

impl KeyValueStore for BrowserStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		self.storage()?.get_item(key).map_err(|e| js_failure("get", key, e))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.storage()?
			.set_item(key, value)
			.map_err(|e| js_failure("set", key, e))
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.storage()?
			.remove_item(key)
			.map_err(|e| js_failure("remove", key, e))
	}
}

/// Process-local store, for tests and for running without a browser.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
	/// An empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether `key` holds a value.
	pub fn contains(&self, key: &str) -> bool {
		self.entries.borrow().contains_key(key)
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		Ok(self.entries.borrow().get(key).cloned())
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		self.entries.borrow_mut().insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.entries.borrow_mut().remove(key);
		Ok(())
	}
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		(**self).get(key)
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		(**self).set(key, value)
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		(**self).remove(key)
	}
}
