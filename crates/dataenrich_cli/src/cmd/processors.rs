use std::rc::Rc;

use dataenrich::resolve::{Node, Processor, ResolveError, Result, Value};

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

/// Processors the `resolve` command registers, in application order.
pub fn builtin() -> Vec<Rc<dyn Processor>> {
	vec![Rc::new(CopyFrom), Rc::new(Upper)]
}

/// Apply each processor to every node of `tree`, inner nodes first.
pub fn apply_all(tree: &Value, processors: &[Rc<dyn Processor>]) -> Result<()> {
	let mut nodes = Vec::new();
	collect_nodes(tree, &mut nodes);
	log::debug!("applying {} processors to {} nodes", processors.len(), nodes.len());

	for processor in processors {
		for node in &nodes {
			node.apply(Rc::clone(processor))?;
		}
	}
	Ok(())
}

fn collect_nodes(value: &Value, out: &mut Vec<Node>) {
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
		Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Pending(_) => {}
	}
}
