// ============================================================================
// spark-cells - Ergonomic Macros
// ============================================================================

/// Helper macro to clone variables into a move closure.
///
/// Cells, streams and widgets are `Rc` handles, so subscriber closures
/// usually start by cloning a few of them.
///
/// # Usage
///
/// ```rust
/// use spark_cells::{cell, cloned};
///
/// let source = cell(1);
/// let mirror = cell(0);
///
/// let _sub = source.subscribe_outgoing(cloned!(mirror => move |v: &i32| {
///     mirror.set(*v * 10).unwrap();
/// }));
///
/// source.set(2).unwrap();
/// assert_eq!(mirror.get(), 20);
/// ```
#[macro_export]
macro_rules! cloned {
    ($($n:ident),+ => $e:expr) => {
        {
            $( let $n = $n.clone(); )+
            $e
        }
    };
}
