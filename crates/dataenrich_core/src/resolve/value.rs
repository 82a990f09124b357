use indexmap::IndexMap;
use serde_json::Number;

use crate::resolve::{Node, Pending};

/// Insertion-ordered mapping of field names to values.
pub type Mapping = IndexMap<String, Value>;

/// Structural value that may still contain nodes or pending computations.
#[derive(Debug, Clone)]
pub enum Value {
	/// Explicit null marker.
	Null,
	/// Boolean scalar.
	Bool(bool),
	/// Integer or float scalar.
	Number(Number),
	/// UTF-8 string scalar.
	String(String),
	/// Ordered sequence.
	Sequence(Vec<Value>),
	/// Key-ordered mapping.
	Mapping(Mapping),
	/// Alias to another node; replaced by that node's result on resolution.
	Node(Node),
	/// Computation that settles to a value later.
	Pending(Pending),
}

impl Value {
	/// Static kind label used in errors and logs.
	pub fn kind(&self) -> &'static str {
		match self {
			Value::Null => "Null",
			Value::Bool(_) => "Bool",
			Value::Number(_) => "Number",
			Value::String(_) => "String",
			Value::Sequence(_) => "Sequence",
			Value::Mapping(_) => "Mapping",
			Value::Node(_) => "Node",
			Value::Pending(_) => "Pending",
		}
	}

	/// Whether the value is a pending computation, settled or not.
	pub fn is_pending(&self) -> bool {
		matches!(self, Value::Pending(_))
	}

	/// Look up a mapping field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		match self {
			Value::Mapping(fields) => fields.get(key),
			_ => None,
		}
	}

	/// Borrow the value as a string when it is one.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(text) => Some(text),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Value::Null, Value::Null) => true,
			(Value::Bool(a), Value::Bool(b)) => a == b,
			(Value::Number(a), Value::Number(b)) => a == b,
			(Value::String(a), Value::String(b)) => a == b,
			(Value::Sequence(a), Value::Sequence(b)) => a == b,
			(Value::Mapping(a), Value::Mapping(b)) => a == b,
			(Value::Node(a), Value::Node(b)) => a.ptr_eq(b),
			(Value::Pending(a), Value::Pending(b)) => a.ptr_eq(b),
			_ => false,
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Number(value.into())
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_owned())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<Vec<Value>> for Value {
	fn from(items: Vec<Value>) -> Self {
		Value::Sequence(items)
	}
}

impl From<Mapping> for Value {
	fn from(fields: Mapping) -> Self {
		Value::Mapping(fields)
	}
}

impl From<Node> for Value {
	fn from(node: Node) -> Self {
		Value::Node(node)
	}
}

impl From<Pending> for Value {
	fn from(pending: Pending) -> Self {
		Value::Pending(pending)
	}
}
