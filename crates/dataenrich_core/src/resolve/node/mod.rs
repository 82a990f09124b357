use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace, warn};

use crate::resolve::walk::resolve_into;
use crate::resolve::{Mapping, Processor, ResolveError, ResolveOptions, Result, Value};

struct NodeState {
	result: Value,
	instructions: Mapping,
	resolved: bool,
	resolving: bool,
	generation: u64,
	deferred_failures: VecDeque<ResolveError>,
}

/// Shared handle to a value with processing instructions attached.
///
/// The result slot and the instruction table are separate storage: instruction fields are
/// copied from the raw mapping at construction and stay readable after processors replace
/// the result. Cloning a `Node` yields another handle to the same node.
#[derive(Clone)]
pub struct Node {
	state: Rc<RefCell<NodeState>>,
}

impl Node {
	/// Wrap a raw mapping; it becomes both the initial result and the instruction table.
	pub fn new(fields: Mapping) -> Self {
		Self::from_parts(Value::Mapping(fields.clone()), fields)
	}

	/// Wrap an arbitrary value as the result with no instructions.
	pub fn from_value(value: impl Into<Value>) -> Self {
		Self::from_parts(value.into(), Mapping::new())
	}

	fn from_parts(result: Value, instructions: Mapping) -> Self {
		Self {
			state: Rc::new(RefCell::new(NodeState {
				result,
				instructions,
				resolved: false,
				resolving: false,
				generation: 0,
				deferred_failures: VecDeque::new(),
			})),
		}
	}

	/// Whether both handles refer to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.state, &other.state)
	}

	/// Fully resolved result with default limits.
	pub fn get_result(&self) -> Result<Value> {
		self.get_result_with(&ResolveOptions::default())
	}

	/// Fully resolved result.
	///
	/// Waits on a pending result, then substitutes nested nodes and pending computations in
	/// place. The resolved value is memoized until the next [`Node::set_result`].
	pub fn get_result_with(&self, options: &ResolveOptions) -> Result<Value> {
		self.resolve_at(0, options)
	}

	pub(crate) fn resolve_at(&self, depth: u32, options: &ResolveOptions) -> Result<Value> {
		if let Some(failure) = self.take_deferred_failure() {
			return Err(failure);
		}

		{
			let state = self.state.borrow();
			if state.resolving {
				return Err(ResolveError::NodeCycle);
			}
			if state.resolved {
				return Ok(state.result.clone());
			}
		}

		self.settle()?;

		let (mut result, generation) = {
			let mut state = self.state.borrow_mut();
			state.resolving = true;
			(std::mem::replace(&mut state.result, Value::Null), state.generation)
		};
		let outcome = resolve_into(&mut result, depth, options);

		let mut state = self.state.borrow_mut();
		state.resolving = false;
		if state.generation != generation {
			drop(state);
			trace!("node result replaced during resolution, restarting");
			return self.resolve_at(depth, options);
		}

		state.result = result;
		outcome?;
		state.resolved = true;
		Ok(state.result.clone())
	}

	fn settle(&self) -> Result<()> {
		let pending = match &self.state.borrow().result {
			Value::Pending(pending) => pending.clone(),
			_ => return Ok(()),
		};

		let settled = pending.wait()?;

		let mut state = self.state.borrow_mut();
		let unchanged = matches!(&state.result, Value::Pending(current) if current.ptr_eq(&pending));
		if unchanged {
			if settled.is_pending() {
				return Err(ResolveError::PendingNotReplaced);
			}
			debug!("node result settled to {}", settled.kind());
			state.result = settled;
		} else if state.result.is_pending() {
			return Err(ResolveError::PendingNotReplaced);
		}

		Ok(())
	}

	fn take_deferred_failure(&self) -> Option<ResolveError> {
		self.state.borrow_mut().deferred_failures.pop_front()
	}

	/// Replace the result slot.
	pub fn set_result(&self, value: impl Into<Value>) {
		let mut state = self.state.borrow_mut();
		state.result = value.into();
		state.resolved = false;
		state.generation += 1;
	}

	/// Current result slot without resolving it.
	pub fn raw_result(&self) -> Value {
		self.state.borrow().result.clone()
	}

	/// Whether the result slot holds a computation that has not settled yet.
	pub fn is_pending(&self) -> bool {
		matches!(&self.state.borrow().result, Value::Pending(pending) if !pending.is_settled())
	}

	/// Whether the result has been fully resolved since the last `set_result`.
	pub fn is_resolved(&self) -> bool {
		self.state.borrow().resolved
	}

	/// Whether the node carries an instruction for `processor`, whatever its value.
	pub fn has_instruction(&self, processor: &dyn Processor) -> bool {
		self.has_property(processor.property())
	}

	/// Whether the node carries an instruction field named `property`.
	pub fn has_property(&self, property: &str) -> bool {
		self.state.borrow().instructions.contains_key(property)
	}

	/// Resolved value of the instruction for `processor`, with default limits.
	pub fn get_instruction(&self, processor: &dyn Processor) -> Result<Value> {
		self.get_instruction_with(processor, &ResolveOptions::default())
	}

	/// Resolved value of the instruction for `processor`.
	pub fn get_instruction_with(&self, processor: &dyn Processor, options: &ResolveOptions) -> Result<Value> {
		self.instruction_resolved(processor.property(), options)
	}

	/// Resolved copy of the instruction field named `property`; the stored field is left as is.
	pub fn instruction_resolved(&self, property: &str, options: &ResolveOptions) -> Result<Value> {
		let mut value = self.instruction(property).ok_or_else(|| ResolveError::MissingInstruction {
			property: property.to_owned(),
		})?;

		resolve_into(&mut value, 0, options)?;
		Ok(value)
	}

	/// Raw instruction field, unresolved.
	pub fn instruction(&self, property: &str) -> Option<Value> {
		self.state.borrow().instructions.get(property).cloned()
	}

	/// Insert or overwrite an instruction field.
	pub fn set_instruction(&self, property: impl Into<String>, value: impl Into<Value>) {
		self.state.borrow_mut().instructions.insert(property.into(), value.into());
	}

	/// Instruction property names in insertion order.
	pub fn instruction_names(&self) -> Vec<String> {
		self.state.borrow().instructions.keys().cloned().collect()
	}

	/// Run `processor` against this node if it carries a matching instruction.
	///
	/// When the result is an unsettled pending computation the processor is deferred until
	/// the computation is fulfilled and this returns immediately; otherwise it runs now.
	/// A deferred processor failure is reported by the next `get_result`.
	pub fn apply(&self, processor: Rc<dyn Processor>) -> Result<()> {
		if !self.has_instruction(processor.as_ref()) {
			return Ok(());
		}

		let pending = match &self.state.borrow().result {
			Value::Pending(pending) if !pending.is_settled() => Some(pending.clone()),
			_ => None,
		};

		let Some(pending) = pending else {
			trace!("applying processor '{}'", processor.property());
			return processor.apply_to_node(self);
		};

		debug!("deferring processor '{}' until result settles", processor.property());
		let node = Rc::downgrade(&self.state);
		pending.then(move |_| run_deferred(&node, processor.as_ref()));
		Ok(())
	}
}

fn run_deferred(node: &Weak<RefCell<NodeState>>, processor: &dyn Processor) {
	let Some(state) = node.upgrade() else {
		trace!("node dropped before deferred processor '{}' ran", processor.property());
		return;
	};

	let node = Node { state };
	if let Err(err) = processor.apply_to_node(&node) {
		warn!("deferred processor '{}' failed: {err}", processor.property());
		node.state.borrow_mut().deferred_failures.push_back(ResolveError::DeferredProcessor {
			property: processor.property().to_owned(),
			source: Box::new(err),
		});
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let Ok(state) = self.state.try_borrow() else {
			return f.write_str("Node { <borrowed> }");
		};
		f.debug_struct("Node")
			.field("instructions", &state.instructions.keys().collect::<Vec<_>>())
			.field("result", &state.result.kind())
			.field("resolved", &state.resolved)
			.finish()
	}
}
