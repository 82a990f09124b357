use log::trace;

use crate::resolve::{ResolveError, Result, Value};

/// Limits applied while resolving nested values.
///
/// Depth counts sequence and mapping nesting only; a node or pending computation stands in for
/// its value at the same level. The default places no limit on depth.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
	/// Maximum aggregate nesting depth before resolution fails.
	pub max_depth: Option<u32>,
}

/// Resolve `value` in place: nodes become their results, pending computations their settled values.
pub fn resolve_value(value: &mut Value, options: &ResolveOptions) -> Result<()> {
	resolve_into(value, 0, options)
}

pub(crate) fn resolve_into(target: &mut Value, depth: u32, options: &ResolveOptions) -> Result<()> {
	if let Some(max_depth) = options.max_depth
		&& depth > max_depth
	{
		return Err(ResolveError::DepthExceeded { max_depth });
	}

	match target {
		Value::Node(node) => {
			let node = node.clone();
			trace!("substituting node result at depth {depth}");
			*target = node.resolve_at(depth, options)?;
		}
		Value::Pending(pending) => {
			let settled = pending.wait()?;
			if settled.is_pending() {
				return Err(ResolveError::PendingNotReplaced);
			}
			*target = settled;
			resolve_into(target, depth, options)?;
		}
		Value::Sequence(items) => {
			for item in items {
				resolve_into(item, depth + 1, options)?;
			}
		}
		Value::Mapping(fields) => {
			for value in fields.values_mut() {
				resolve_into(value, depth + 1, options)?;
			}
		}
		Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
	}

	Ok(())
}
