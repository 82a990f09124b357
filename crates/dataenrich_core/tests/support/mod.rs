#![allow(dead_code)]

use std::rc::Rc;

use dataenrich::resolve::{Mapping, Node, Pending, Processor, ResolveError, Result, Value};

/// Replaces the result with the upper-cased instruction string.
pub struct Upper;

impl Processor for Upper {
	fn property(&self) -> &str {
		"<upper>"
	}

	fn apply_to_node(&self, node: &Node) -> Result<()> {
		let value = node.get_instruction(self)?;
		let Some(text) = value.as_str() else {
			return Err(ResolveError::processor(self.property(), format!("expected string, got {}", value.kind())));
		};
		node.set_result(text.to_uppercase());
		Ok(())
	}
}

/// Replaces the result with a lookup that settles when first awaited.
pub struct Fetch;

impl Processor for Fetch {
	fn property(&self) -> &str {
		"<fetch>"
	}

	fn apply_to_node(&self, node: &Node) -> Result<()> {
		let id = node.get_instruction(self)?;
		node.set_result(Pending::with_waiter(move |pending| {
			let mut record = Mapping::new();
			record.insert("id".to_owned(), id);
			record.insert("city".to_owned(), Value::from("Utrecht"));
			pending.fulfill(record).expect("lookup settles once");
		}));
		Ok(())
	}
}

/// Adds a `stamp` field to a mapping result.
pub struct Stamp;

impl Processor for Stamp {
	fn property(&self) -> &str {
		"<stamp>"
	}

	fn apply_to_node(&self, node: &Node) -> Result<()> {
		let stamp = node.get_instruction(self)?;
		let Value::Mapping(mut fields) = node.get_result()? else {
			return Err(ResolveError::processor(self.property(), "expected mapping result"));
		};
		fields.insert("stamp".to_owned(), stamp);
		node.set_result(fields);
		Ok(())
	}
}

/// Replaces the result with the resolved instruction value.
pub struct CopyFrom;

impl Processor for CopyFrom {
	fn property(&self) -> &str {
		"<copy>"
	}

	fn apply_to_node(&self, node: &Node) -> Result<()> {
		node.set_result(node.get_instruction(self)?);
		Ok(())
	}
}

/// Collect every node reachable through instruction fields, children before parents.
pub fn collect_nodes(value: &Value, out: &mut Vec<Node>) {
	match value {
		Value::Node(node) => {
			for name in node.instruction_names() {
				if let Some(field) = node.instruction(&name) {
					collect_nodes(&field, out);
				}
			}
			out.push(node.clone());
		}
		Value::Sequence(items) => items.iter().for_each(|item| collect_nodes(item, out)),
		Value::Mapping(fields) => fields.values().for_each(|field| collect_nodes(field, out)),
		_ => {}
	}
}

/// Apply each processor to every node, processor by processor.
pub fn run_pipeline(tree: &Value, processors: &[Rc<dyn Processor>]) -> Result<()> {
	let mut nodes = Vec::new();
	collect_nodes(tree, &mut nodes);
	for processor in processors {
		for node in &nodes {
			node.apply(Rc::clone(processor))?;
		}
	}
	Ok(())
}
