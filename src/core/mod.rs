// ============================================================================
// spark-cells - Core Module
// Flags, errors and equality capabilities shared by every primitive
// ============================================================================

pub(crate) mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::CellError;
pub use types::{default_equals, EqualsFn, Equality, Listener, PartialEqualsFn};
