//! Dynamic tabular editor
//!
//! A line-items table whose rows carry a fixed, schema-defined set of fields
//! plus an open-ended set of user-defined columns. The state is a plain
//! serializable value; the free functions in [`ops`] return new states and
//! [`TableState`] exposes the same operations in place. Rendering is a pure
//! projection of rows, columns and the display mode.

pub mod columns;
pub mod errors;
pub mod ops;
pub mod state;
pub mod view;

pub use columns::{normalize_key, ColumnProposal, RejectReason};
pub use errors::EditorError;
pub use ops::{EditorCommand, EditorOutcome};
pub use state::{CellTarget, TableSchema, TableState};
pub use view::{project, TableView, ViewCell, ViewRow};
