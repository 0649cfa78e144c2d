//! Pipeline outcome types: stage tags and failure values

use crate::spec::SpecificationDocument;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The pipeline stage at which a generation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Text extraction from the input payload (client-input failure)
    Extraction,

    /// The round trip to the completion service (upstream-dependency failure)
    Completion,

    /// Structured-output validation (upstream-quality failure)
    Validation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Extraction => "extraction",
            Stage::Completion => "completion",
            Stage::Validation => "validation",
        };
        f.write_str(s)
    }
}

/// A failed generation, tagged with the stage that short-circuited it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    /// Stage at which the pipeline stopped
    pub stage: Stage,

    /// Description of the underlying error
    pub message: String,
}

impl GenerationFailure {
    /// Tag an error with the stage it occurred in
    pub fn new(stage: Stage, error: impl fmt::Display) -> Self {
        Self {
            stage,
            message: error.to_string(),
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

impl std::error::Error for GenerationFailure {}

/// Result of one pipeline invocation
pub type GenerationOutcome = Result<SpecificationDocument, GenerationFailure>;
