// ============================================================================
// spark-cells - Reactivity Module
// Change detection: deciding whether a write is a change
// ============================================================================

pub mod equality;

pub use equality::{
    by_partial_eq, by_partial_ord, nan_safe_f32, nan_safe_f64, never, never_equals,
    partial_equals, safe_equals_f32, safe_equals_f64, safe_not_equal_f32, safe_not_equal_f64,
};
