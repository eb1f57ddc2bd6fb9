//! Error types for the designer

use formstudio_schema::ElementId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("replacement instance id {got} does not match target id {expected}")]
    IdMismatch { expected: ElementId, got: ElementId },

    #[error("duplicate element id: {0}")]
    DuplicateId(ElementId),
}
