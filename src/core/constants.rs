// ============================================================================
// spark-cells - Constants
// Flag constants for cell and stream lifecycle state
// ============================================================================

// =============================================================================
// CELL BINDING FLAGS
// =============================================================================

/// Cell has no widget attached; the cell itself emits outgoing changes
pub const UNBOUND: u32 = 1 << 0;

/// A widget is attached and owns outgoing emission
pub const BOUND: u32 = 1 << 1;

// =============================================================================
// LIFECYCLE FLAGS
// =============================================================================

/// Cell or stream has been disposed (terminal)
pub const DISPOSED: u32 = 1 << 2;

// =============================================================================
// BINDING MASK (for clearing binding bits)
// =============================================================================

/// Mask to clear the binding bits (UNBOUND, BOUND)
pub const BINDING_MASK: u32 = !(UNBOUND | BOUND);

// =============================================================================
// TESTS
// =============================================================================
