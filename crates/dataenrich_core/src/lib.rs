//! Lazy node resolution and processing-instruction dispatch for nested data.

/// Node, pending-computation, and processor types plus the resolution walk.
pub mod resolve;
