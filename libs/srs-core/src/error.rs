//! Error types for srs-core.

use thiserror::Error;

/// Result type alias using ValidationError.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Errors raised while validating user input, before any state changes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("unknown outcome: {0}")]
    UnknownOutcome(String),

    #[error("import contains no usable cards")]
    EmptyImport,
}
