//! SpecDraft Text Extractor
//!
//! Converts an input payload (raw text or a PDF byte stream) into a single
//! plain-text document for the generation pipeline.
//!
//! # Behavior
//!
//! - Plain text: identity transform after UTF-8 verification
//! - PDF: per-page text extraction, concatenated in page order with no
//!   separator guarantee
//! - A structurally valid but textless PDF (e.g. scanned images) yields an
//!   empty document without error; emptiness handling is deferred to the
//!   completion stage
//!
//! Extraction is local and deterministic; there is no retry.
//!
//! # Examples
//!
//! ```
//! use specdraft_domain::RequirementInput;
//! use specdraft_extract::extract;
//!
//! let input = RequirementInput::PlainText("Users can buy coffee.".to_string());
//! let doc = extract(input).unwrap();
//! assert_eq!(doc.as_str(), "Users can buy coffee.");
//! ```

#![warn(missing_docs)]

mod error;
mod extractor;

pub use error::ExtractionError;
pub use extractor::{classify_upload, extract};
