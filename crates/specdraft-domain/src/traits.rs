//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and
//! infrastructure. Infrastructure implementations live in other crates.

use crate::record::{SpecRecord, StoredRecord};
use std::fmt;
use std::future::Future;

/// Trait for the generative text-completion service
///
/// Implemented by the infrastructure layer (specdraft-llm). One invocation
/// is exactly one request/response round trip; retry policy, if any, is the
/// caller's decision.
pub trait CompletionProvider {
    /// Error type for completion operations
    type Error: fmt::Display;

    /// Send a rendered prompt and return the raw text output
    fn complete(
        &self,
        prompt: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Trait for the structured-record store
///
/// Implemented by the infrastructure layer (specdraft-store)
pub trait SpecStore {
    /// Error type for store operations
    type Error: fmt::Display;

    /// Insert a record, returning its store-assigned identifier.
    ///
    /// Records are never deduplicated: inserting twice with identical
    /// arguments produces two independent rows.
    fn insert_record(&mut self, record: &StoredRecord) -> Result<i64, Self::Error>;

    /// List a user's records, newest first
    fn records_for_user(&self, user_id: &str) -> Result<Vec<SpecRecord>, Self::Error>;
}

/// Trait for the artifact (blob) store
///
/// Implemented by the infrastructure layer (specdraft-store). Failures are
/// treated as non-fatal by the persistence coordinator.
pub trait ArtifactStore {
    /// Error type for artifact operations
    type Error: fmt::Display;

    /// Store a blob under the given key, overwriting any existing blob
    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), Self::Error>;
}
