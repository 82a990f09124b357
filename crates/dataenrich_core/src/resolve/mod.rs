mod error;
mod json;
mod node;
mod pending;
mod processor;
mod value;
mod walk;

/// Error and result aliases.
pub use error::{ResolveError, Result};
/// JSON conversion entry points.
pub use json::node_tree_from_json;
/// Node handle with instruction table and result slot.
pub use node::Node;
/// Single-threaded pending computation.
pub use pending::Pending;
/// Processor capability contract.
pub use processor::Processor;
/// Runtime value types.
pub use value::{Mapping, Value};
/// In-place resolution walk and its limits.
pub use walk::{ResolveOptions, resolve_value};
