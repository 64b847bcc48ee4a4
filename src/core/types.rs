// ============================================================================
// spark-cells - Type Definitions
// Equality capabilities and listener types shared by streams and cells
// ============================================================================

use std::rc::Rc;

// =============================================================================
// LISTENERS
// =============================================================================

/// A subscriber callback. Stored strongly by the stream that owns it.
pub type Listener<T> = Rc<dyn Fn(&T)>;

// =============================================================================
// EQUALITY CAPABILITY
// =============================================================================
//
// Cells suppress no-op writes by comparing the incoming value against the
// current one. The comparison is an explicit parameter instead of a blanket
// `PartialEq` bound so that:
// - floats can opt into NaN-safe comparison
// - types without meaningful equality can always publish
// - comparisons that cannot decide fall back to "different" and publish
// =============================================================================

/// Equality function type for comparing cell values
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Equality function that may decline to decide (`None`).
pub type PartialEqualsFn<T> = fn(&T, &T) -> Option<bool>;

/// Default equality using PartialEq
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

/// How a cell decides whether a write is a no-op.
pub enum Equality<T> {
    /// Always answers.
    Total(EqualsFn<T>),
    /// May answer `None`, in which case the values are treated as different.
    Partial(PartialEqualsFn<T>),
}

impl<T> Equality<T> {
    /// Run the comparison, returning `None` if it could not decide.
    pub fn compare(&self, a: &T, b: &T) -> Option<bool> {
        match self {
            Equality::Total(f) => Some(f(a, b)),
            Equality::Partial(f) => f(a, b),
        }
    }

    /// Whether `a` and `b` count as the same value.
    ///
    /// An undecided comparison yields `false` so the write is published.
    pub fn is_equal(&self, a: &T, b: &T) -> bool {
        match self.compare(a, b) {
            Some(equal) => equal,
            None => {
                tracing::trace!("equality undecided, treating values as different");
                false
            }
        }
    }
}

impl<T: PartialEq> Default for Equality<T> {
    fn default() -> Self {
        crate::reactivity::equality::by_partial_eq()
    }
}

impl<T> Clone for Equality<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Equality<T> {}

impl<T> std::fmt::Debug for Equality<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Equality::Total(_) => f.write_str("Equality::Total"),
            Equality::Partial(_) => f.write_str("Equality::Partial"),
        }
    }
}

impl<T> From<EqualsFn<T>> for Equality<T> {
    fn from(f: EqualsFn<T>) -> Self {
        Equality::Total(f)
    }
}

impl<T> From<PartialEqualsFn<T>> for Equality<T> {
    fn from(f: PartialEqualsFn<T>) -> Self {
        Equality::Partial(f)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn undecided(_: &i32, _: &i32) -> Option<bool> {
        None
    }

    #[test]
    fn default_equality_uses_partial_eq() {
        let eq: Equality<i32> = Equality::default();
        assert!(eq.is_equal(&1, &1));
        assert!(!eq.is_equal(&1, &2));
        assert_eq!(eq.compare(&1, &1), Some(true));
    }

    #[test]
    fn undecided_comparison_counts_as_different() {
        let eq = Equality::Partial(undecided);
        assert_eq!(eq.compare(&1, &1), None);
        assert!(!eq.is_equal(&1, &1));
    }

    #[test]
    fn from_fn_pointers() {
        let total: Equality<i32> = Equality::from(default_equals::<i32> as EqualsFn<i32>);
        assert!(matches!(total, Equality::Total(_)));

        let partial: Equality<i32> = Equality::from(undecided as PartialEqualsFn<i32>);
        assert!(matches!(partial, Equality::Partial(_)));
    }

    #[test]
    fn equality_is_copy() {
        let eq: Equality<String> = Equality::default();
        let copy = eq;
        assert!(eq.is_equal(&"a".to_string(), &"a".to_string()));
        assert!(copy.is_equal(&"a".to_string(), &"a".to_string()));
        assert_eq!(format!("{:?}", copy), "Equality::Total");
    }
}
