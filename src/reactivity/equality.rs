// ============================================================================
// spark-cells - Equality Functions
// Ready-made comparison capabilities for cells
// ============================================================================

use std::cmp::Ordering;

use crate::core::types::{default_equals, EqualsFn, Equality, PartialEqualsFn};

// =============================================================================
// SAFE EQUALITY (NaN == NaN)
// =============================================================================

/// Safe not-equal check for f64.
/// Handles NaN: NaN is considered equal to NaN (unlike IEEE 754).
///
/// # Example
/// ```
/// use spark_cells::reactivity::equality::safe_not_equal_f64;
///
/// assert!(safe_not_equal_f64(&1.0, &2.0));
/// assert!(!safe_not_equal_f64(&f64::NAN, &f64::NAN));
/// assert!(safe_not_equal_f64(&f64::NAN, &1.0));
/// ```
pub fn safe_not_equal_f64(a: &f64, b: &f64) -> bool {
    if a.is_nan() {
        return !b.is_nan();
    }
    a != b
}

/// Safe equality for f64 values. NaN == NaN returns true.
///
/// # Example
/// ```
/// use spark_cells::reactivity::equality::safe_equals_f64;
///
/// assert!(safe_equals_f64(&1.0, &1.0));
/// assert!(safe_equals_f64(&f64::NAN, &f64::NAN));
/// ```
pub fn safe_equals_f64(a: &f64, b: &f64) -> bool {
    !safe_not_equal_f64(a, b)
}

/// Safe not-equal check for f32.
pub fn safe_not_equal_f32(a: &f32, b: &f32) -> bool {
    if a.is_nan() {
        return !b.is_nan();
    }
    a != b
}

/// Safe equality for f32 values.
pub fn safe_equals_f32(a: &f32, b: &f32) -> bool {
    !safe_not_equal_f32(a, b)
}

// =============================================================================
// PARTIAL EQUALITY (may not decide)
// =============================================================================

/// Equality through `PartialOrd`. Incomparable values (NaN) yield `None`,
/// which a cell treats as "different" and publishes.
///
/// # Example
/// ```
/// use spark_cells::reactivity::equality::partial_equals;
///
/// assert_eq!(partial_equals(&1.0, &1.0), Some(true));
/// assert_eq!(partial_equals(&1.0, &2.0), Some(false));
/// assert_eq!(partial_equals(&f64::NAN, &f64::NAN), None);
/// ```
pub fn partial_equals<T: PartialOrd>(a: &T, b: &T) -> Option<bool> {
    a.partial_cmp(b).map(|ordering| ordering == Ordering::Equal)
}

// =============================================================================
// FACTORY FUNCTIONS
// =============================================================================

/// Never equal - every write publishes.
/// Useful for types without meaningful equality.
///
/// # Example
/// ```
/// use spark_cells::reactivity::equality::never_equals;
///
/// assert!(!never_equals(&42, &42));
/// ```
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

// =============================================================================
// EQUALITY CONSTRUCTORS (for Equality<T>)
// =============================================================================

/// The default capability: `PartialEq`.
pub fn by_partial_eq<T: PartialEq>() -> Equality<T> {
    Equality::Total(default_equals as EqualsFn<T>)
}

/// `PartialOrd`-based capability that may not decide.
pub fn by_partial_ord<T: PartialOrd + 'static>() -> Equality<T> {
    Equality::Partial(partial_equals as PartialEqualsFn<T>)
}

/// Capability that treats every write as a change.
pub fn never<T: 'static>() -> Equality<T> {
    Equality::Total(never_equals as EqualsFn<T>)
}

/// NaN-safe capability for f64.
pub fn nan_safe_f64() -> Equality<f64> {
    Equality::Total(safe_equals_f64)
}

/// NaN-safe capability for f32.
pub fn nan_safe_f32() -> Equality<f32> {
    Equality::Total(safe_equals_f32)
}

// =============================================================================
// TESTS
// =============================================================================
