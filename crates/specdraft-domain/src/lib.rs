//! SpecDraft Domain Layer
//!
//! This crate contains the core data model for SpecDraft: the requirement
//! input forms, the canonical specification document produced by the
//! generation pipeline, the pipeline outcome types, and the trait interfaces
//! that all other layers depend upon.
//!
//! ## Key Concepts
//!
//! - **RequirementInput**: raw text or a PDF byte stream, consumed once
//! - **SpecificationDocument**: the canonical structured result with five
//!   always-present fields (modules, user stories, API specs, DB schema,
//!   edge cases)
//! - **Stage**: where in the pipeline a failure occurred
//! - **StoredRecord**: the unit handed to the record store
//!
//! ## Architecture
//!
//! Infrastructure implementations (completion provider, record store,
//! artifact store) live in other crates; this crate only defines the seams.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod input;
pub mod outcome;
pub mod record;
pub mod spec;
pub mod traits;

// Re-exports for convenience
pub use input::{ExtractedDocument, RequirementInput};
pub use outcome::{GenerationFailure, GenerationOutcome, Stage};
pub use record::{SpecRecord, StoredRecord, UserIdentity};
pub use spec::{ApiSpec, SpecificationDocument, TableSchema};
