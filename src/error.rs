// ⚠️ Receipt Errors - Typed failures for the processing pipeline
// The core signals these; the HTTP boundary decides status codes.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReceiptError {
    /// A date, time, total or price field could not be parsed
    #[error("{field} could not be parsed from {value:?}")]
    MalformedInput { field: String, value: String },

    /// An identical receipt was already accepted
    #[error("receipt was already submitted")]
    DuplicateSubmission,

    /// No receipt was ever stored under this identifier
    #[error("no receipt with id {0}")]
    NotFound(String),
}

impl ReceiptError {
    pub fn malformed(field: impl Into<String>, value: impl Into<String>) -> Self {
        ReceiptError::MalformedInput {
            field: field.into(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ReceiptError>;
