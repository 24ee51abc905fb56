//! Form shell error types

use thiserror::Error;

use crate::editor::EditorError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    #[error("Form '{0}' is not in the catalog. Run 'formgrid forms' to list available forms")]
    UnknownForm(String),

    #[error("Header field '{0}' is not part of this form")]
    UnknownField(String),

    #[error("Signature slot '{0}' is not part of this form")]
    UnknownSignatureSlot(String),

    #[error(transparent)]
    Editor(#[from] EditorError),
}
