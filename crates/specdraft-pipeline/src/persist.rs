//! Persistence Coordinator
//!
//! Given a successful structured result, performs a best-effort artifact
//! upload followed by a record insert. Neither failure surfaces to the
//! caller: the caller's primary interest is the structured result, and
//! availability of the immediate answer is prioritized over guaranteed
//! durability. Failures are routed to the log only.

use specdraft_domain::traits::{ArtifactStore, SpecStore};
use specdraft_domain::{SpecificationDocument, StoredRecord, UserIdentity};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// What the coordinator managed to store, for operational visibility only.
///
/// Callers must not fail a request on this; the contract is fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Whether the raw artifact was archived
    pub artifact_stored: bool,

    /// Whether the structured record was inserted
    pub record_stored: bool,
}

/// Coordinates the artifact archive and the structured-record insert
pub struct PersistenceCoordinator<A: ArtifactStore, S: SpecStore> {
    artifacts: Arc<A>,
    records: Arc<Mutex<S>>,
}

impl<A: ArtifactStore, S: SpecStore> Clone for PersistenceCoordinator<A, S> {
    fn clone(&self) -> Self {
        Self {
            artifacts: Arc::clone(&self.artifacts),
            records: Arc::clone(&self.records),
        }
    }
}

impl<A, S> PersistenceCoordinator<A, S>
where
    A: ArtifactStore,
    S: SpecStore,
{
    /// Create a coordinator over the two stores
    pub fn new(artifacts: A, records: S) -> Self {
        Self {
            artifacts: Arc::new(artifacts),
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Archive the raw bytes (if present) and insert the structured record.
    ///
    /// Records are never deduplicated: calling this twice with identical
    /// arguments produces two independent records.
    pub fn persist(
        &self,
        identity: &UserIdentity,
        filename: &str,
        doc: SpecificationDocument,
        raw_bytes: Option<&[u8]>,
    ) -> PersistOutcome {
        let mut outcome = PersistOutcome {
            artifact_stored: false,
            record_stored: false,
        };

        // Step 1, best-effort: archive the raw artifact.
        if let Some(bytes) = raw_bytes {
            let key = format!("{}/{}", identity.user_id, filename);
            match self.artifacts.put(&key, bytes) {
                Ok(()) => {
                    debug!(key = %key, bytes = bytes.len(), "artifact archived");
                    outcome.artifact_stored = true;
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "artifact archive failed");
                }
            }
        }

        // Step 2: insert the structured record. Failure is logged and
        // swallowed; the structured result has already been finalized.
        let record = StoredRecord::new(identity, filename, doc);
        match self.records.lock() {
            Ok(mut store) => match store.insert_record(&record) {
                Ok(id) => {
                    debug!(record_id = id, user_id = %record.user_id, "record inserted");
                    outcome.record_stored = true;
                }
                Err(e) => {
                    warn!(user_id = %record.user_id, error = %e, "record insert failed");
                }
            },
            Err(_) => {
                warn!("record store lock poisoned; record not inserted");
            }
        }

        outcome
    }

    /// Shared handle to the record store (listing surface)
    pub fn records(&self) -> Arc<Mutex<S>> {
        Arc::clone(&self.records)
    }
}
