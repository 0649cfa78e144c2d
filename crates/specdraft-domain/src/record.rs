//! Persistence record and user identity types

use crate::spec::SpecificationDocument;
use serde::{Deserialize, Serialize};

/// An authenticated user identity resolved by the auth gate.
///
/// The pipeline treats this as a read-only capability for attributing a
/// stored record; it never inspects the credential the identity came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Opaque user identifier
    pub user_id: String,

    /// Expiry of the credential that produced this identity (Unix epoch secs)
    pub expires_at: u64,
}

impl UserIdentity {
    /// Build an identity from its parts
    pub fn new(user_id: impl Into<String>, expires_at: u64) -> Self {
        Self {
            user_id: user_id.into(),
            expires_at,
        }
    }
}

/// The unit handed to the record store.
///
/// `created_at` is assigned by the store; the pipeline only constructs and
/// hands this off, never reads it back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Owning user
    pub user_id: String,

    /// Original filename of the requirements artifact
    pub raw_filename: String,

    /// The validated specification
    pub content: SpecificationDocument,
}

impl StoredRecord {
    /// Build a record attributed to the given identity
    pub fn new(
        identity: &UserIdentity,
        raw_filename: impl Into<String>,
        content: SpecificationDocument,
    ) -> Self {
        Self {
            user_id: identity.user_id.clone(),
            raw_filename: raw_filename.into(),
            content,
        }
    }
}

/// A record as read back from the store (listing surface only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecRecord {
    /// Store-assigned row identifier
    pub id: i64,

    /// Owning user
    pub user_id: String,

    /// Original filename of the requirements artifact
    pub raw_filename: String,

    /// The stored specification
    pub content: SpecificationDocument,

    /// Store-assigned creation timestamp (RFC 3339 / SQLite datetime text)
    pub created_at: String,
}
