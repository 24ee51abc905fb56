//! Reusable UI components for the form TUI

pub mod form_field;
pub mod status_display;
pub mod table_editor;

pub use form_field::{Form, FormField, FormFieldType};
pub use status_display::StatusDisplay;
pub use table_editor::{TableEditor, TableEditorConfig};
