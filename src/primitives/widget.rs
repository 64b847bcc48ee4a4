// ============================================================================
// spark-cells - Widget Bindings
// Attaching a (possibly late-created) UI widget to an observable cell
// ============================================================================
//
// The widget contract:
// - show(value) reflects a value. If the displayed state actually changes,
//   the widget reports it as an edit, the way toolkit controls fire their
//   "value changed" callback when assigned programmatically.
// - on_edit(handler) installs the callback for user edits.
//
// attach_widget wires both directions and flips the cell to Bound, so from
// then on the widget is the only source of outgoing notifications.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::core::error::CellError;
use crate::primitives::cell::{ObservableCell, WeakCell};

// =============================================================================
// WIDGET TRAIT
// =============================================================================

/// Callback a widget invokes when the user edits its value.
pub type EditHandler<T> = Box<dyn Fn(T)>;

/// A UI control that can display a `T` and report user edits.
pub trait Widget<T> {
    /// Reflect `value` in the widget.
    fn show(&self, value: &T);

    /// Install the callback for user edits.
    fn on_edit(&self, handler: EditHandler<T>);
}

// =============================================================================
// WIDGET BINDING
// =============================================================================

/// A handle to the link between a cell and its widget.
///
/// The cell's incoming stream owns the display listener, so the widget
/// keeps following the cell whether or not this handle is kept. The link
/// ends when the cell is disposed or dropped.
pub struct WidgetBinding<T> {
    cell: WeakCell<T>,
}

impl<T: Clone + 'static> WidgetBinding<T> {
    /// The bound cell, if it is still alive.
    pub fn cell(&self) -> Option<ObservableCell<T>> {
        self.cell.upgrade()
    }

    /// Whether the widget still receives value updates.
    pub fn is_live(&self) -> bool {
        self.cell.upgrade().is_some_and(|cell| !cell.is_disposed())
    }
}

impl<T> std::fmt::Debug for WidgetBinding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetBinding").finish_non_exhaustive()
    }
}

/// Bind `widget` to `cell`.
///
/// Fails with [`CellError::DoubleBind`] if another widget is already bound
/// and with [`CellError::Disposed`] if the cell is gone. On success the
/// widget has already been shown the current value.
///
/// # Example
///
/// ```
/// use spark_cells::{attach_widget, cell, Toggle};
///
/// let enabled = cell(true);
/// let toggle = Toggle::new(false);
///
/// let _binding = attach_widget(&enabled, toggle.clone()).unwrap();
/// assert!(toggle.value());
///
/// toggle.click();
/// assert!(!enabled.get());
/// ```
pub fn attach_widget<T, W>(cell: &ObservableCell<T>, widget: Rc<W>) -> Result<WidgetBinding<T>, CellError>
where
    T: Clone + 'static,
    W: Widget<T> + 'static,
{
    cell.bind()?;

    let weak = cell.downgrade();
    let name = cell.name();
    widget.on_edit(Box::new(move |value: T| {
        let Some(cell) = weak.upgrade() else {
            return;
        };
        if let Err(err) = cell.push_from_widget(value) {
            tracing::warn!(cell = name, %err, "dropping widget edit");
        }
    }));

    // Owned by the incoming stream until the cell goes away.
    cell.subscribe_incoming(move |value: &T| widget.show(value))
        .detach();

    tracing::debug!(cell = name, "widget attached");
    Ok(WidgetBinding {
        cell: cell.downgrade(),
    })
}

// =============================================================================
// FIELD<T> - HEADLESS WIDGET
// =============================================================================

/// A headless editable control.
///
/// Behaves like a toolkit control: assigning a different value through
/// [`show`](Widget::show) or [`edit`](Field::edit) fires the edit handlers;
/// assigning the value it already holds does nothing. Useful for tests and
/// as a reference implementation of [`Widget`].
pub struct Field<T> {
    value: RefCell<T>,
    handlers: RefCell<Vec<Rc<dyn Fn(T)>>>,
    /// Number of times the displayed state actually changed
    changes: Cell<usize>,
}

impl<T: Clone + PartialEq + 'static> Field<T> {
    /// Create a field displaying `value`.
    pub fn new(value: T) -> Rc<Self> {
        Rc::new(Self {
            value: RefCell::new(value),
            handlers: RefCell::new(Vec::new()),
            changes: Cell::new(0),
        })
    }

    /// The displayed value.
    pub fn value(&self) -> T {
        self.value.borrow().clone()
    }

    /// Simulate the user entering `value`.
    pub fn edit(&self, value: T) {
        self.assign(value);
    }

    /// How many times the displayed value changed.
    pub fn change_count(&self) -> usize {
        self.changes.get()
    }

    fn assign(&self, value: T) {
        if *self.value.borrow() == value {
            return;
        }
        *self.value.borrow_mut() = value.clone();
        self.changes.set(self.changes.get() + 1);

        let handlers: Vec<Rc<dyn Fn(T)>> = self.handlers.borrow().iter().cloned().collect();
        for handler in &handlers {
            handler(value.clone());
        }
    }
}

impl<T: Clone + PartialEq + 'static> Widget<T> for Field<T> {
    fn show(&self, value: &T) {
        self.assign(value.clone());
    }

    fn on_edit(&self, handler: EditHandler<T>) {
        self.handlers.borrow_mut().push(Rc::from(handler));
    }
}

/// A headless on/off switch.
pub type Toggle = Field<bool>;

impl Field<bool> {
    /// Flip the switch as a user would.
    pub fn click(&self) {
        let next = !self.value();
        self.edit(next);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::cell::cell;
    use crate::primitives::stream::Subscription;

    fn record_outgoing<T: Clone + 'static>(
        c: &ObservableCell<T>,
    ) -> (Rc<RefCell<Vec<T>>>, Subscription) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let sub = c.subscribe_outgoing(move |v| sink.borrow_mut().push(v.clone()));
        (log, sub)
    }

    #[test]
    fn attach_shows_current_value() {
        let c = cell(7);
        let field = Field::new(0);
        let _binding = attach_widget(&c, field.clone()).unwrap();

        assert!(c.is_bound());
        assert_eq!(field.value(), 7);
    }

    #[test]
    fn creation_fires_outgoing_once_when_widget_differs() {
        let c = cell(true);
        let (outgoing, _o) = record_outgoing(&c);

        let toggle = Toggle::new(false);
        let _binding = attach_widget(&c, toggle.clone()).unwrap();

        // The widget flipped to match and reported it.
        assert_eq!(*outgoing.borrow(), vec![true]);
    }

    #[test]
    fn creation_is_silent_when_widget_matches() {
        let c = cell(true);
        let (outgoing, _o) = record_outgoing(&c);

        let toggle = Toggle::new(true);
        let _binding = attach_widget(&c, toggle).unwrap();
        assert!(outgoing.borrow().is_empty());
    }

    #[test]
    fn user_edit_reaches_outgoing_once() {
        let c = cell(false);
        let toggle = Toggle::new(false);
        let _binding = attach_widget(&c, toggle.clone()).unwrap();
        let (outgoing, _o) = record_outgoing(&c);

        toggle.click();
        assert!(c.get());
        assert_eq!(*outgoing.borrow(), vec![true]);
    }

    #[test]
    fn external_set_is_echoed_by_widget_not_cell() {
        let c = cell(1);
        let field = Field::new(1);
        let _binding = attach_widget(&c, field.clone()).unwrap();
        let (outgoing, _o) = record_outgoing(&c);

        c.set(2).unwrap();
        assert_eq!(field.value(), 2);
        // Exactly one notification, coming from the widget's edit.
        assert_eq!(*outgoing.borrow(), vec![2]);
        assert_eq!(field.change_count(), 1);
    }

    #[test]
    fn discarded_binding_keeps_widget_in_charge() {
        let c = cell(false);
        let toggle = Toggle::new(false);
        let (outgoing, _o) = record_outgoing(&c);

        drop(attach_widget(&c, toggle.clone()).unwrap());

        c.set(true).unwrap();
        assert!(toggle.value());
        assert_eq!(*outgoing.borrow(), vec![true]);
    }

    #[test]
    fn second_widget_is_rejected() {
        let c = cell(0);
        let _first = attach_widget(&c, Field::new(0)).unwrap();
        let second = Field::new(5);

        let err = attach_widget(&c, second.clone()).unwrap_err();
        assert_eq!(err, CellError::DoubleBind);
        // The rejected widget was never wired up.
        assert_eq!(second.value(), 5);
    }

    #[test]
    fn attach_to_disposed_cell_fails() {
        let c = cell(0);
        c.dispose();
        assert_eq!(
            attach_widget(&c, Field::new(0)).unwrap_err(),
            CellError::Disposed
        );
    }

    #[test]
    fn edits_after_dispose_are_dropped() {
        let c = cell(false);
        let toggle = Toggle::new(false);
        let binding = attach_widget(&c, toggle.clone()).unwrap();

        c.dispose();
        assert!(!binding.is_live());

        toggle.click(); // logged and ignored
        assert!(!c.get());
    }

    #[test]
    fn edits_after_cell_dropped_are_ignored() {
        let toggle = Toggle::new(false);
        let binding = {
            let c = cell(false);
            attach_widget(&c, toggle.clone()).unwrap()
        };
        assert!(binding.cell().is_none());
        toggle.click();
        assert!(toggle.value());
    }

    #[test]
    fn toggle_click_flips() {
        let toggle = Toggle::new(false);
        toggle.click();
        assert!(toggle.value());
        toggle.click();
        assert!(!toggle.value());
        assert_eq!(toggle.change_count(), 2);
    }

    #[test]
    fn field_ignores_same_value() {
        let field = Field::new(String::from("a"));
        let fired = Rc::new(Cell::new(0));
        field.on_edit(Box::new({
            let fired = fired.clone();
            move |_: String| fired.set(fired.get() + 1)
        }));

        field.edit(String::from("a"));
        assert_eq!(fired.get(), 0);
        field.edit(String::from("b"));
        assert_eq!(fired.get(), 1);
    }
}
