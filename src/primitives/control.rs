// ============================================================================
// spark-cells - Controls
// Editable controls whose widget may be created long after the value
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::error::CellError;
use crate::primitives::cell::ObservableCell;
use crate::primitives::stream::Subscription;
use crate::primitives::widget::{attach_widget, Widget, WidgetBinding};

// =============================================================================
// EDITABLE CONTROL
// =============================================================================

struct ControlInner<T> {
    cell: ObservableCell<T>,
    binding: RefCell<Option<WidgetBinding<T>>>,
}

/// A control with a value that can be changed and watched for changes.
///
/// The value is usable immediately. The widget is created later, when the
/// host UI is ready, through [`create_control`](Self::create_control).
/// Subscribers to [`value_changed`](Self::value_changed) see every change
/// exactly once either way.
///
/// # Example
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use spark_cells::{EditableControl, Field};
///
/// let opacity = EditableControl::new(100u8);
/// let last = Rc::new(Cell::new(0));
/// let _sub = opacity.value_changed({
///     let last = last.clone();
///     move |v: &u8| last.set(*v)
/// });
///
/// opacity.set_value(50).unwrap(); // no widget yet
/// assert_eq!(last.get(), 50);
///
/// let slider = Field::new(0u8);
/// opacity.create_control(slider.clone()).unwrap();
/// slider.edit(75);
/// assert_eq!(last.get(), 75);
/// ```
pub struct EditableControl<T> {
    inner: Rc<ControlInner<T>>,
}

impl<T> Clone for EditableControl<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + 'static> EditableControl<T> {
    /// Create a control with `initial` as its value.
    pub fn new(initial: T) -> Self
    where
        T: PartialEq,
    {
        Self::from_cell(ObservableCell::new(initial))
    }

    /// Wrap an existing unbound cell.
    pub fn from_cell(cell: ObservableCell<T>) -> Self {
        Self {
            inner: Rc::new(ControlInner {
                cell,
                binding: RefCell::new(None),
            }),
        }
    }

    /// The current value.
    pub fn value(&self) -> T {
        self.inner.cell.get()
    }

    /// Change the value from code.
    pub fn set_value(&self, value: T) -> Result<bool, CellError> {
        self.inner.cell.set(value)
    }

    /// Fired every time the value changes, and once when the control is
    /// created if the new widget had to change to show the value.
    pub fn value_changed(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.inner.cell.subscribe_outgoing(callback)
    }

    /// Instantiate the control with `widget`.
    ///
    /// A control can only be created once.
    pub fn create_control<W>(&self, widget: Rc<W>) -> Result<(), CellError>
    where
        W: Widget<T> + 'static,
    {
        let binding = attach_widget(&self.inner.cell, widget)?;
        *self.inner.binding.borrow_mut() = Some(binding);
        Ok(())
    }

    /// Whether a widget has been created for this control.
    pub fn is_instantiated(&self) -> bool {
        self.inner.binding.borrow().is_some()
    }

    /// The underlying cell.
    pub fn cell(&self) -> &ObservableCell<T> {
        &self.inner.cell
    }

    /// Dispose the value streams and drop the widget link.
    pub fn dispose(&self) {
        self.inner.cell.dispose();
        self.inner.binding.borrow_mut().take();
    }

    /// Whether the control has been disposed.
    pub fn is_disposed(&self) -> bool {
        self.inner.cell.is_disposed()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for EditableControl<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditableControl")
            .field("cell", &self.inner.cell)
            .field("instantiated", &self.inner.binding.borrow().is_some())
            .finish()
    }
}

// =============================================================================
// TEXT LABEL
// =============================================================================

/// A read-only control that displays a fixed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLabel {
    text: String,
}

impl TextLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Displayed text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for TextLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
