// ============================================================================
// spark-cells - Load Toggles
// A registry of labelled on/off controls with bulk operations
// ============================================================================
//
// Owned by whoever drives the host UI: created when the screen is set up,
// reset when it is torn down. There is no global instance.
// ============================================================================

use std::rc::Rc;

use crate::core::error::CellError;
use crate::primitives::control::EditableControl;
use crate::primitives::stream::Subscription;
use crate::primitives::widget::Widget;

// =============================================================================
// LOAD TOGGLE
// =============================================================================

/// A labelled boolean control, e.g. "load hair data" on a load screen.
///
/// Cloning gives another handle to the same toggle.
#[derive(Clone)]
pub struct LoadToggle {
    label: Rc<str>,
    control: EditableControl<bool>,
}

impl LoadToggle {
    /// Create a toggle that starts on.
    pub fn new(label: impl Into<Rc<str>>) -> Self {
        Self::with_initial(label, true)
    }

    /// Create a toggle with an explicit starting value.
    pub fn with_initial(label: impl Into<Rc<str>>, initial: bool) -> Self {
        Self {
            label: label.into(),
            control: EditableControl::new(initial),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> bool {
        self.control.value()
    }

    pub fn set_value(&self, value: bool) -> Result<bool, CellError> {
        self.control.set_value(value)
    }

    /// See [`EditableControl::value_changed`].
    pub fn value_changed(&self, callback: impl Fn(&bool) + 'static) -> Subscription {
        self.control.value_changed(callback)
    }

    pub fn is_instantiated(&self) -> bool {
        self.control.is_instantiated()
    }

    pub fn control(&self) -> &EditableControl<bool> {
        &self.control
    }
}

impl std::fmt::Debug for LoadToggle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadToggle")
            .field("label", &self.label)
            .field("value", &self.control.value())
            .field("instantiated", &self.control.is_instantiated())
            .finish()
    }
}

// =============================================================================
// LOAD TOGGLES REGISTRY
// =============================================================================

/// Registry of [`LoadToggle`]s.
///
/// # Example
///
/// ```
/// use spark_cells::{LoadToggles, Toggle};
///
/// let mut toggles = LoadToggles::new();
/// let hair = toggles.add("Hair");
/// let body = toggles.add("Body");
///
/// toggles.set_all(false).unwrap();
/// assert!(!toggles.any_enabled());
///
/// // The screen is up: give every toggle a widget
/// let created = toggles.create_controls(|_| Toggle::new(false));
/// assert_eq!(created, 2);
///
/// body.set_value(true).unwrap();
/// assert!(toggles.any_enabled());
/// assert!(!hair.value());
///
/// toggles.reset();
/// assert!(toggles.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct LoadToggles {
    toggles: Vec<LoadToggle>,
}

impl LoadToggles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new toggle that starts on and return a handle to it.
    pub fn add(&mut self, label: impl Into<Rc<str>>) -> LoadToggle {
        self.add_with(label, true)
    }

    /// Register a new toggle with an explicit starting value.
    pub fn add_with(&mut self, label: impl Into<Rc<str>>, initial: bool) -> LoadToggle {
        let toggle = LoadToggle::with_initial(label, initial);
        tracing::debug!(label = toggle.label(), initial, "load toggle added");
        self.toggles.push(toggle.clone());
        toggle
    }

    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LoadToggle> {
        self.toggles.iter()
    }

    /// True if at least one toggle is on.
    pub fn any_enabled(&self) -> bool {
        self.toggles.iter().any(LoadToggle::value)
    }

    /// Switch every toggle on or off ("all on" / "all off").
    ///
    /// Returns how many toggles actually changed.
    pub fn set_all(&self, value: bool) -> Result<usize, CellError> {
        let mut changed = 0;
        for toggle in &self.toggles {
            if toggle.set_value(value)? {
                changed += 1;
            }
        }
        Ok(changed)
    }

    /// Create a widget for every live toggle that doesn't have one yet.
    ///
    /// `make_widget` is called once per toggle, in registration order.
    /// Disposed toggles are skipped. A toggle whose widget cannot be
    /// attached is logged and skipped; the rest are still created.
    /// Returns how many widgets were created.
    pub fn create_controls<W, F>(&self, mut make_widget: F) -> usize
    where
        W: Widget<bool> + 'static,
        F: FnMut(&LoadToggle) -> Rc<W>,
    {
        let mut created = 0;
        let pending = self
            .toggles
            .iter()
            .filter(|t| !t.is_instantiated() && !t.control.is_disposed());
        for toggle in pending {
            match toggle.control.create_control(make_widget(toggle)) {
                Ok(()) => created += 1,
                Err(err) => {
                    tracing::warn!(label = toggle.label(), %err, "skipping load toggle control");
                }
            }
        }
        tracing::debug!(created, total = self.toggles.len(), "load toggle controls created");
        created
    }

    /// Dispose every toggle and empty the registry.
    pub fn reset(&mut self) {
        for toggle in self.toggles.drain(..) {
            toggle.control.dispose();
        }
    }
}

impl<'a> IntoIterator for &'a LoadToggles {
    type Item = &'a LoadToggle;
    type IntoIter = std::slice::Iter<'a, LoadToggle>;

    fn into_iter(self) -> Self::IntoIter {
        self.toggles.iter()
    }
}

// =============================================================================
// TESTS
// =============================================================================
