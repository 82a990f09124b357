use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, ResolveError>;

/// Errors produced while resolving nodes and dispatching processors.
#[derive(Debug, Error)]
pub enum ResolveError {
	/// A node's result slot still held a pending computation after waiting on it.
	#[error("pending result not replaced with data")]
	PendingNotReplaced,
	/// Instruction lookup for a property the node does not carry.
	#[error("missing instruction property '{property}'")]
	MissingInstruction {
		/// Processor property name that was looked up.
		property: String,
	},
	/// Waiting returned while the computation was still unsettled.
	#[error("pending computation did not settle while waiting")]
	NeverSettled,
	/// The awaited computation was rejected.
	#[error("pending computation rejected: {reason}")]
	Rejected {
		/// Rejection reason supplied by the producer.
		reason: String,
	},
	/// A computation was fulfilled or rejected a second time.
	#[error("pending computation already settled")]
	AlreadySettled,
	/// A node was reached again while its own result was being resolved.
	#[error("node cycle detected during resolution")]
	NodeCycle,
	/// Resolution walk exceeded configured nesting depth.
	#[error("resolve depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// A processor deferred until settlement failed when it ran.
	#[error("deferred processor '{property}' failed: {source}")]
	DeferredProcessor {
		/// Property name of the failing processor.
		property: String,
		/// Failure reported by the processor.
		#[source]
		source: Box<ResolveError>,
	},
	/// Failure reported by a processor implementation.
	#[error("processor '{property}': {reason}")]
	Processor {
		/// Property name of the reporting processor.
		property: String,
		/// Processor-supplied description.
		reason: String,
	},
	/// Export encountered a node or pending computation that was never resolved.
	#[error("unresolved {kind} cannot be exported")]
	Unresolved {
		/// Kind label of the offending value.
		kind: &'static str,
	},
}

impl ResolveError {
	/// Build a processor-reported failure.
	pub fn processor(property: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::Processor {
			property: property.into(),
			reason: reason.into(),
		}
	}
}
