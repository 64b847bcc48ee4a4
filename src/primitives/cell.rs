// ============================================================================
// spark-cells - Observable Cell
// A value with a replaying incoming stream, an outgoing change stream and a
// deferred widget binding that takes over outgoing emission once attached
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::core::constants::*;
use crate::core::error::CellError;
use crate::core::types::{EqualsFn, Equality, Listener};
use crate::primitives::stream::{Stream, Subscription};
use crate::reactivity::equality::{nan_safe_f32, nan_safe_f64};

/// Name used in tracing output when none is configured.
const DEFAULT_NAME: &str = "cell";

// =============================================================================
// CELL OPTIONS
// =============================================================================

/// Options for creating a cell.
pub struct CellOptions<T> {
    /// How writes are compared against the current value.
    /// `None` means `PartialEq`.
    pub equality: Option<Equality<T>>,

    /// Name reported in tracing events.
    pub name: Option<&'static str>,
}

impl<T> Default for CellOptions<T> {
    fn default() -> Self {
        Self {
            equality: None,
            name: None,
        }
    }
}

// =============================================================================
// CELL INNER
// =============================================================================

struct CellInner<T> {
    /// Binding + lifecycle flags
    flags: Cell<u32>,

    name: &'static str,

    /// The current value
    value: RefCell<T>,

    equality: Equality<T>,

    /// Replays the current value to new subscribers, then every change.
    /// Widgets listen here to stay in sync.
    incoming: Stream<T>,

    /// Public change notifications.
    outgoing: Stream<T>,
}

impl<T> CellInner<T> {
    fn is_bound(&self) -> bool {
        self.flags.get() & BOUND != 0
    }

    fn is_disposed(&self) -> bool {
        self.flags.get() & DISPOSED != 0
    }
}

// =============================================================================
// OBSERVABLE CELL<T> - The public cell handle
// =============================================================================

/// A value container that keeps an internal value, a user-facing change
/// stream and an optional UI widget in sync.
///
/// Until a widget binds, every effective [`set`](Self::set) is published on
/// both the incoming and the outgoing stream. Once a widget has called
/// [`bind`](Self::bind), `set` only feeds the incoming stream: the widget
/// observes it, updates its display and reports back through
/// [`push_from_widget`](Self::push_from_widget), which is what reaches
/// outgoing subscribers. The cell never double-fires.
///
/// Cloning a cell creates another handle to the same state.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use spark_cells::cell;
///
/// let enabled = cell(false);
/// let changes = Rc::new(RefCell::new(Vec::new()));
///
/// let _sub = enabled.subscribe_outgoing({
///     let changes = changes.clone();
///     move |v: &bool| changes.borrow_mut().push(*v)
/// });
///
/// enabled.set(true).unwrap();
/// enabled.set(true).unwrap(); // no-op
/// assert_eq!(*changes.borrow(), vec![true]);
/// ```
pub struct ObservableCell<T> {
    inner: Rc<CellInner<T>>,
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> ObservableCell<T> {
    /// Create a new unbound cell using `PartialEq` to detect no-op writes.
    pub fn new(value: T) -> Self
    where
        T: PartialEq,
    {
        Self::with_equality(value, Equality::default())
    }

    /// Create a new unbound cell with an explicit equality capability.
    pub fn with_equality(value: T, equality: Equality<T>) -> Self {
        Self::from_parts(value, equality, DEFAULT_NAME)
    }

    fn from_parts(value: T, equality: Equality<T>, name: &'static str) -> Self {
        Self {
            inner: Rc::new(CellInner {
                flags: Cell::new(UNBOUND),
                name,
                value: RefCell::new(value),
                equality,
                incoming: Stream::new(),
                outgoing: Stream::new(),
            }),
        }
    }

    /// Get the current value (cloning). Works after disposal too.
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    /// Access the current value with a closure (avoids cloning).
    ///
    /// # Panics
    ///
    /// Panics if `f` writes to this cell, directly or through a subscriber,
    /// since the value stays borrowed while `f` runs.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Set the value from non-widget code.
    ///
    /// Returns `Ok(false)` without emitting anything if `value` equals the
    /// current value. Otherwise stores it, emits on the incoming stream and,
    /// while no widget is bound, on the outgoing stream too.
    pub fn set(&self, value: T) -> Result<bool, CellError> {
        self.ensure_live("set")?;

        let unchanged = {
            let current = self.inner.value.borrow();
            self.inner.equality.is_equal(&current, &value)
        };
        if unchanged {
            return Ok(false);
        }

        *self.inner.value.borrow_mut() = value.clone();

        let bound = self.inner.is_bound();
        tracing::trace!(cell = self.inner.name, bound, "set");

        self.inner.incoming.emit(&value);
        // A bound widget re-emits through its own edit callback.
        if !bound {
            self.inner.outgoing.emit(&value);
        }
        Ok(true)
    }

    /// Report a user edit coming from the bound widget.
    ///
    /// Always stores the value and emits on both streams, even if it equals
    /// the current value. Echo suppression is the widget's job on this path.
    pub fn push_from_widget(&self, value: T) -> Result<(), CellError> {
        self.ensure_live("push_from_widget")?;

        *self.inner.value.borrow_mut() = value.clone();
        tracing::trace!(cell = self.inner.name, "push from widget");

        self.inner.incoming.emit(&value);
        self.inner.outgoing.emit(&value);
        Ok(())
    }

    /// Subscribe to the incoming stream.
    ///
    /// The callback is called synchronously with the current value before
    /// this returns, then with every later change. After disposal the
    /// callback is never called, not even for the replay.
    pub fn subscribe_incoming(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        if self.inner.is_disposed() {
            return Subscription::inert();
        }

        let listener: Listener<T> = Rc::new(callback);
        let subscription = self.inner.incoming.subscribe_listener(listener.clone());
        let current = self.get();
        listener(&current);
        subscription
    }

    /// Subscribe to the outgoing stream: every externally meaningful change.
    ///
    /// This is the contract consumers rely on. It makes no assumption about
    /// whether a widget exists.
    pub fn subscribe_outgoing(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.outgoing.subscribe(callback)
    }

    /// Mark the cell as bound to a live widget.
    ///
    /// From now on `set` no longer emits on the outgoing stream. Binding is
    /// one-way: a bound cell stays bound until it is disposed.
    pub fn bind(&self) -> Result<(), CellError> {
        self.ensure_live("bind")?;

        if self.inner.is_bound() {
            tracing::warn!(cell = self.inner.name, "bind called on an already bound cell");
            return Err(CellError::DoubleBind);
        }

        let flags = (self.inner.flags.get() & BINDING_MASK) | BOUND;
        self.inner.flags.set(flags);
        tracing::debug!(cell = self.inner.name, "bound to widget");
        Ok(())
    }

    /// Close both streams. Terminal; disposing twice is a no-op.
    ///
    /// `get` keeps returning the last value. `set`, `push_from_widget` and
    /// `bind` fail with [`CellError::Disposed`] afterwards.
    pub fn dispose(&self) {
        if self.inner.is_disposed() {
            return;
        }
        self.inner.flags.set(self.inner.flags.get() | DISPOSED);
        self.inner.incoming.close();
        self.inner.outgoing.close();
        tracing::debug!(cell = self.inner.name, "disposed");
    }

    /// Whether a widget has bound to this cell.
    pub fn is_bound(&self) -> bool {
        self.inner.is_bound()
    }

    /// Whether `dispose()` has been called.
    pub fn is_disposed(&self) -> bool {
        self.inner.is_disposed()
    }

    /// The name reported in tracing events.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Create a weak handle that doesn't keep the cell alive.
    ///
    /// Widgets hold their cell weakly: the cell's incoming stream already
    /// holds the widget.
    pub fn downgrade(&self) -> WeakCell<T> {
        WeakCell {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn ensure_live(&self, op: &'static str) -> Result<(), CellError> {
        if self.inner.is_disposed() {
            tracing::warn!(cell = self.inner.name, op, "mutation after dispose");
            return Err(CellError::Disposed);
        }
        Ok(())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ObservableCell<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObservableCell")
            .field("name", &self.inner.name)
            .field("value", &*self.inner.value.borrow())
            .field("bound", &self.inner.is_bound())
            .field("disposed", &self.inner.is_disposed())
            .finish()
    }
}

// =============================================================================
// WEAK CELL
// =============================================================================

/// A non-owning handle to an [`ObservableCell`].
pub struct WeakCell<T> {
    inner: Weak<CellInner<T>>,
}

impl<T> Clone for WeakCell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> WeakCell<T> {
    /// Get a strong handle if the cell is still alive.
    pub fn upgrade(&self) -> Option<ObservableCell<T>> {
        self.inner.upgrade().map(|inner| ObservableCell { inner })
    }
}

// =============================================================================
// CELL CREATION FUNCTIONS
// =============================================================================

/// Create a new observable cell.
///
/// # Example
///
/// ```
/// use spark_cells::cell;
///
/// let volume = cell(3);
/// assert_eq!(volume.get(), 3);
///
/// assert!(volume.set(4).unwrap());
/// assert!(!volume.set(4).unwrap());
/// ```
pub fn cell<T>(value: T) -> ObservableCell<T>
where
    T: Clone + PartialEq + 'static,
{
    ObservableCell::new(value)
}

/// Create a cell with a custom equality function.
///
/// # Example
///
/// ```
/// use spark_cells::primitives::cell::cell_with_equals;
///
/// // Every write counts as a change
/// let always_notify = cell_with_equals(0, |_, _| false);
/// assert!(always_notify.set(0).unwrap());
/// ```
pub fn cell_with_equals<T>(value: T, equals: EqualsFn<T>) -> ObservableCell<T>
where
    T: Clone + 'static,
{
    ObservableCell::with_equality(value, Equality::Total(equals))
}

/// Create a cell with an explicit equality capability.
pub fn cell_with_equality<T>(value: T, equality: Equality<T>) -> ObservableCell<T>
where
    T: Clone + 'static,
{
    ObservableCell::with_equality(value, equality)
}

/// Create a cell from options.
///
/// # Example
///
/// ```
/// use spark_cells::{cell_with_options, CellOptions};
///
/// let speed = cell_with_options(
///     1.0,
///     CellOptions {
///         name: Some("speed"),
///         ..Default::default()
///     },
/// );
/// assert_eq!(speed.name(), "speed");
/// ```
pub fn cell_with_options<T>(value: T, options: CellOptions<T>) -> ObservableCell<T>
where
    T: Clone + PartialEq + 'static,
{
    let equality = options.equality.unwrap_or_default();
    let name = options.name.unwrap_or(DEFAULT_NAME);
    ObservableCell::from_parts(value, equality, name)
}

/// Create a cell for f64 values with NaN-safe equality.
///
/// # Example
///
/// ```
/// use spark_cells::primitives::cell::cell_f64;
///
/// let value = cell_f64(f64::NAN);
/// assert!(!value.set(f64::NAN).unwrap()); // NaN == NaN here
/// assert!(value.set(1.0).unwrap());
/// ```
pub fn cell_f64(value: f64) -> ObservableCell<f64> {
    ObservableCell::with_equality(value, nan_safe_f64())
}

/// Create a cell for f32 values with NaN-safe equality.
pub fn cell_f32(value: f32) -> ObservableCell<f32> {
    ObservableCell::with_equality(value, nan_safe_f32())
}

// =============================================================================
// TESTS
// =============================================================================
