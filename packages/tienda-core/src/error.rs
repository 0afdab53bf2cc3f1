//! Error types for client-side validation.

use thiserror::Error;

/// Result type for form validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// A form field failed one of the presence or range checks done before
/// anything is sent to the server.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Name of the offending form field
    pub field: &'static str,
    /// Message shown in the banner
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }

    pub fn required(field: &'static str, label: &str) -> Self {
        Self::new(field, format!("El campo {} es requerido", label))
    }
}
