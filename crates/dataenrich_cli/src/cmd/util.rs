use std::path::Path;

use dataenrich::resolve::{ResolveOptions, Value, node_tree_from_json};

use crate::cmd::Result;

pub(crate) fn load_tree(path: &Path) -> Result<Value> {
	let bytes = std::fs::read(path).map_err(|err| format!("read {}: {err}", path.display()))?;
	let json: serde_json::Value = serde_json::from_slice(&bytes).map_err(|err| format!("parse {}: {err}", path.display()))?;
	log::debug!("loaded {} ({} bytes)", path.display(), bytes.len());
	Ok(node_tree_from_json(json))
}

pub(crate) fn resolve_options(max_depth: Option<u32>) -> ResolveOptions {
	ResolveOptions { max_depth }
}

pub(crate) fn print_json(value: &serde_json::Value, compact: bool) -> Result<()> {
	let text = if compact { serde_json::to_string(value)? } else { serde_json::to_string_pretty(value)? };
	println!("{text}");
	Ok(())
}

/// Append one RFC 6901 reference token to a JSON pointer.
pub(crate) fn pointer_child(parent: &str, token: &str) -> String {
	format!("{parent}/{}", token.replace('~', "~0").replace('/', "~1"))
}
