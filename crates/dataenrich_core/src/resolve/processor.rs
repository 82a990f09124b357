use crate::resolve::{Node, Result};

/// Transformation rule dispatched to nodes carrying a matching instruction.
pub trait Processor {
	/// Instruction property name this processor responds to.
	fn property(&self) -> &str;

	/// Mutate `node`, typically through [`Node::get_instruction`] and [`Node::set_result`].
	fn apply_to_node(&self, node: &Node) -> Result<()>;
}
