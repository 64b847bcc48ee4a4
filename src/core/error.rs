// ============================================================================
// spark-cells - Errors
// Contract violations surfaced by cells and widget bindings
// ============================================================================

use thiserror::Error;

/// Error returned when a cell is used outside its binding contract.
///
/// Both variants are programming errors in the integrating code, not
/// transient conditions. Nothing in this crate retries on them.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellError {
    /// A mutation (`set`, `push_from_widget`, `bind`) was attempted after
    /// the cell was disposed.
    #[error("cell has been disposed")]
    Disposed,

    /// `bind()` was called on a cell that already has a widget attached.
    #[error("cell is already bound to a widget")]
    DoubleBind,
}

// =============================================================================
// TESTS
// =============================================================================
