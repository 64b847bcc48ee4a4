// ============================================================================
// spark-cells - Primitives Module
// Streams, observable cells, widget bindings and editable controls
// ============================================================================

pub mod cell;
pub mod control;
pub mod stream;
pub mod widget;

// Re-export for convenience
pub use cell::{
    cell, cell_f32, cell_f64, cell_with_equality, cell_with_equals, cell_with_options,
    CellOptions, ObservableCell, WeakCell,
};
pub use control::{EditableControl, TextLabel};
pub use stream::{Stream, Subscription};
pub use widget::{attach_widget, EditHandler, Field, Toggle, Widget, WidgetBinding};
