// ============================================================================
// spark-cells - Control Collections
// Registries that own groups of controls with explicit setup and teardown
// ============================================================================

mod toggles;

pub use toggles::{LoadToggle, LoadToggles};
