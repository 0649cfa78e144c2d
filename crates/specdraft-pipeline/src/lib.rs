//! SpecDraft Generation Pipeline
//!
//! Turns a requirements document into a structured specification through a
//! language-model call, then persists the result.
//!
//! # Architecture
//!
//! ```text
//! RequirementInput → Extractor → Prompt Builder → Completion → Validator
//!                                                                  │
//!                                     PersistenceCoordinator ◄── Success
//! ```
//!
//! The `Generator` sequences the four stages synchronously within one
//! invocation; the first failing stage short-circuits the remainder and is
//! reported as a `GenerationFailure` tagged with the stage. Persistence is a
//! separate, best-effort step that never fails the primary result.
//!
//! # Example
//!
//! ```
//! use specdraft_domain::RequirementInput;
//! use specdraft_llm::MockProvider;
//! use specdraft_pipeline::{Generator, PipelineConfig};
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new(r#"{"modules": ["ordering"]}"#);
//! let generator = Generator::new(provider, PipelineConfig::default());
//!
//! let input = RequirementInput::PlainText("Users can order coffee.".to_string());
//! let spec = generator.generate(input).await.unwrap();
//! assert_eq!(spec.modules, vec!["ordering"]);
//! # });
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod generator;
mod persist;
mod prompt;
mod validator;

#[cfg(test)]
mod tests;

pub use config::PipelineConfig;
pub use error::ValidationError;
pub use generator::Generator;
pub use persist::{PersistOutcome, PersistenceCoordinator};
pub use prompt::{PromptTemplate, RenderedPrompt};
pub use validator::validate;
