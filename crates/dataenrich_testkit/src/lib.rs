//! JSON fixture helpers shared by workspace tests.

use std::path::{Path, PathBuf};

/// Path of a document under `<workspace>/fixtures`.
pub fn fixture_path(name: &str) -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures").join(name)
}

/// Parsed JSON document under `<workspace>/fixtures`; panics with the path when unreadable.
pub fn fixture_json(name: &str) -> serde_json::Value {
	let path = fixture_path(name);
	let bytes = std::fs::read(&path).unwrap_or_else(|err| panic!("fixture {} readable: {err}", path.display()));
	serde_json::from_slice(&bytes).unwrap_or_else(|err| panic!("fixture {} is valid json: {err}", path.display()))
}
