//! Form shell around the line-items editor
//!
//! Holds the schema-defined header fields, the signature slots and the
//! display mode, validates what the user entered and hands the assembled
//! state to a submit hook.

pub mod errors;
pub mod schema;
pub mod shell;
pub mod signature;
pub mod summary;
pub mod validation;

pub use errors::FormError;
pub use schema::FormSchema;
pub use shell::{FormShell, FormState};
pub use signature::{SignatureBlock, SignatureView};
pub use summary::TableSummary;
pub use validation::{FieldError, FieldLocation, ValidationReport};
