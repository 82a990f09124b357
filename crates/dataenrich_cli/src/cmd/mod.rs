/// Instruction listing command.
pub mod instructions;
/// Built-in processors applied by `resolve`.
pub mod processors;
/// Whole-document resolve command.
pub mod resolve;
mod util;

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Command result type.
pub type Result<T> = std::result::Result<T, DynError>;
