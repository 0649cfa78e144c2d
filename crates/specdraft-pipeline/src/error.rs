//! Error types for the pipeline

use thiserror::Error;

/// Errors that can occur during structured-output validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The raw output is not syntactically valid JSON
    #[error("output is not well-formed JSON: {0}")]
    NotWellFormed(String),

    /// The output parsed but does not match the specification schema
    #[error("output does not match the specification schema: {0}")]
    SchemaMismatch(String),
}
