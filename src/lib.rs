// ============================================================================
// spark-cells - Deferred-Binding Observable Cells for Rust
// ============================================================================
//
// A cell holds a value, replays it to widgets on an incoming stream and
// publishes changes to consumers on an outgoing stream. Widgets can be
// attached late; once one is attached it owns outgoing emission so nothing
// is reported twice.
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;
pub mod primitives;
pub mod reactivity;

// Re-export core items at crate root for ergonomic access
pub use crate::core::error::CellError;
pub use crate::core::types::{default_equals, EqualsFn, Equality, Listener, PartialEqualsFn};

// Re-export primitives at crate root
pub use primitives::cell::{
    cell, cell_f32, cell_f64, cell_with_equality, cell_with_equals, cell_with_options,
    CellOptions, ObservableCell, WeakCell,
};
pub use primitives::control::{EditableControl, TextLabel};
pub use primitives::stream::{Stream, Subscription};
pub use primitives::widget::{attach_widget, EditHandler, Field, Toggle, Widget, WidgetBinding};

// Re-export equality helpers
pub use reactivity::equality::{
    by_partial_eq, by_partial_ord, nan_safe_f32, nan_safe_f64, never, never_equals,
    partial_equals, safe_equals_f32, safe_equals_f64,
};

// Re-export collections
pub use collections::{LoadToggle, LoadToggles};

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log<T> = Rc<RefCell<Vec<T>>>;

    fn logs<T: Clone + 'static>(
        c: &ObservableCell<T>,
    ) -> (Log<T>, Log<T>, Subscription, Subscription) {
        let incoming: Log<T> = Rc::new(RefCell::new(Vec::new()));
        let outgoing: Log<T> = Rc::new(RefCell::new(Vec::new()));
        let i = c.subscribe_incoming(cloned!(incoming => move |v: &T| incoming.borrow_mut().push(v.clone())));
        let o = c.subscribe_outgoing(cloned!(outgoing => move |v: &T| outgoing.borrow_mut().push(v.clone())));
        (incoming, outgoing, i, o)
    }

    // =========================================================================
    // Cell contract
    // =========================================================================

    #[test]
    fn set_distinct_value_unbound() {
        let c = cell(1);
        let (incoming, outgoing, _i, _o) = logs(&c);

        c.set(2).unwrap();
        assert_eq!(c.get(), 2);
        assert_eq!(*incoming.borrow(), vec![1, 2]);
        assert_eq!(*outgoing.borrow(), vec![2]);
    }

    #[test]
    fn set_current_value_emits_nothing() {
        let c = cell(9);
        let (incoming, outgoing, _i, _o) = logs(&c);
        incoming.borrow_mut().clear(); // drop the replay

        c.set(9).unwrap();
        assert!(incoming.borrow().is_empty());
        assert!(outgoing.borrow().is_empty());
    }

    #[test]
    fn bound_set_skips_outgoing() {
        let c = cell(1);
        c.bind().unwrap();
        let (incoming, outgoing, _i, _o) = logs(&c);

        c.set(2).unwrap();
        assert_eq!(*incoming.borrow(), vec![1, 2]);
        assert!(outgoing.borrow().is_empty());
    }

    #[test]
    fn widget_push_always_emits() {
        let c = cell(1);
        let (incoming, outgoing, _i, _o) = logs(&c);

        c.push_from_widget(1).unwrap();
        assert_eq!(*incoming.borrow(), vec![1, 1]);
        assert_eq!(*outgoing.borrow(), vec![1]);
    }

    #[test]
    fn dispose_then_set_fails() {
        let c = cell(1);
        c.set(5).unwrap();
        c.dispose();
        assert_eq!(c.set(6), Err(CellError::Disposed));
        assert_eq!(c.get(), 5);
    }

    #[test]
    fn load_toggle_scenario() {
        let c = cell(false);
        let (incoming, outgoing, _i, _o) = logs(&c);

        // No widget yet: the cell reports the change itself.
        c.set(true).unwrap();
        assert_eq!(*outgoing.borrow(), vec![true]);

        // Widget goes live; a user edit is always reported.
        c.bind().unwrap();
        c.push_from_widget(false).unwrap();
        assert_eq!(*outgoing.borrow(), vec![true, false]);

        // Writing the value it already holds is a no-op.
        c.set(false).unwrap();
        assert_eq!(*incoming.borrow(), vec![false, true, false]);

        // A real change from code reaches the widget only.
        c.set(true).unwrap();
        assert_eq!(*incoming.borrow(), vec![false, true, false, true]);
        assert_eq!(*outgoing.borrow(), vec![true, false]);
    }

    // =========================================================================
    // End to end
    // =========================================================================

    #[test]
    fn deferred_widget_end_to_end() {
        let control = EditableControl::new(false);
        let reported: Log<bool> = Rc::new(RefCell::new(Vec::new()));
        let _sub = control.value_changed(cloned!(reported => move |v: &bool| reported.borrow_mut().push(*v)));

        control.set_value(true).unwrap();

        let toggle = Toggle::new(true);
        control.create_control(toggle.clone()).unwrap();
        toggle.click();
        control.set_value(true).unwrap();

        assert_eq!(*reported.borrow(), vec![true, false, true]);
        assert!(toggle.value());
    }
}
