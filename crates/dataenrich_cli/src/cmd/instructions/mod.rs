use std::path::PathBuf;

use dataenrich::resolve::{ResolveOptions, Value};
use serde::Serialize;

use crate::cmd::Result;
use crate::cmd::util::{load_tree, pointer_child, print_json};

/// One node carrying the requested instruction.
#[derive(Debug, Serialize)]
pub struct InstructionRow {
	/// JSON pointer of the node within the document.
	pub path: String,
	/// Resolved instruction value.
	pub value: serde_json::Value,
}

/// Print every node carrying `property` as a JSON array.
pub fn run(path: PathBuf, property: String) -> Result<()> {
	let tree = load_tree(&path)?;
	let rows = find_instructions(&tree, &property)?;
	print_json(&serde_json::to_value(rows)?, false)
}

pub(crate) fn find_instructions(tree: &Value, property: &str) -> Result<Vec<InstructionRow>> {
	let mut rows = Vec::new();
	collect(tree, "", property, &mut rows)?;
	Ok(rows)
}

fn collect(value: &Value, pointer: &str, property: &str, rows: &mut Vec<InstructionRow>) -> Result<()> {
	match value {
		Value::Node(node) => {
			if node.has_property(property) {
				rows.push(InstructionRow {
					path: pointer.to_owned(),
					value: node.instruction_resolved(property, &ResolveOptions::default())?.to_json()?,
				});
			}
			for name in node.instruction_names() {
				if let Some(field) = node.instruction(&name) {
					collect(&field, &pointer_child(pointer, &name), property, rows)?;
				}
			}
		}
		Value::Sequence(items) => {
			for (idx, item) in items.iter().enumerate() {
				collect(item, &pointer_child(pointer, &idx.to_string()), property, rows)?;
			}
		}
		Value::Mapping(fields) => {
			for (name, field) in fields {
				collect(field, &pointer_child(pointer, name), property, rows)?;
			}
		}
		Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Pending(_) => {}
	}
	Ok(())
}
