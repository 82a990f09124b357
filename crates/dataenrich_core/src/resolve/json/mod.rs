use serde_json::Value as Json;

use crate::resolve::{Mapping, Node, ResolveError, Result, Value};

impl From<Json> for Value {
	fn from(json: Json) -> Self {
		match json {
			Json::Null => Value::Null,
			Json::Bool(value) => Value::Bool(value),
			Json::Number(value) => Value::Number(value),
			Json::String(value) => Value::String(value),
			Json::Array(items) => Value::Sequence(items.into_iter().map(Value::from).collect()),
			Json::Object(fields) => Value::Mapping(fields.into_iter().map(|(key, value)| (key, Value::from(value))).collect()),
		}
	}
}

impl Value {
	/// Convert a fully resolved value to JSON.
	pub fn to_json(&self) -> Result<Json> {
		Ok(match self {
			Value::Null => Json::Null,
			Value::Bool(value) => Json::Bool(*value),
			Value::Number(value) => Json::Number(value.clone()),
			Value::String(value) => Json::String(value.clone()),
			Value::Sequence(items) => Json::Array(items.iter().map(Value::to_json).collect::<Result<_>>()?),
			Value::Mapping(fields) => Json::Object(
				fields
					.iter()
					.map(|(key, value)| value.to_json().map(|json| (key.clone(), json)))
					.collect::<Result<_>>()?,
			),
			Value::Node(_) | Value::Pending(_) => return Err(ResolveError::Unresolved { kind: self.kind() }),
		})
	}
}

/// Build a node tree from JSON: every object becomes a [`Node`] whose fields are its instructions.
pub fn node_tree_from_json(json: Json) -> Value {
	match json {
		Json::Array(items) => Value::Sequence(items.into_iter().map(node_tree_from_json).collect()),
		Json::Object(fields) => {
			let fields: Mapping = fields.into_iter().map(|(key, value)| (key, node_tree_from_json(value))).collect();
			Value::Node(Node::new(fields))
		}
		scalar => Value::from(scalar),
	}
}
