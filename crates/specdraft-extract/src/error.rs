//! Error types for text extraction

use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Payload claimed to be text but does not decode as UTF-8
    #[error("invalid text encoding: {0}")]
    InvalidEncoding(String),

    /// Byte stream is not a structurally valid document
    #[error("malformed document: {0}")]
    MalformedDocument(String),
}
