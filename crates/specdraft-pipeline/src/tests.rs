//! End-to-end pipeline tests with a mock completion provider

use crate::{Generator, PersistOutcome, PersistenceCoordinator, PipelineConfig};
use specdraft_domain::traits::{ArtifactStore, SpecStore};
use specdraft_domain::{
    RequirementInput, SpecRecord, SpecificationDocument, Stage, StoredRecord, UserIdentity,
};
use specdraft_llm::MockProvider;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

const COFFEE_INPUT: &str = "Users can buy coffee and pay by card. Admins see orders.";

const COFFEE_RESPONSE: &str = r#"{
    "modules": ["coffee ordering", "payment", "admin order view"],
    "user_stories": ["As a user I want to buy coffee and pay by card"],
    "api_specs": [{"method": "POST", "path": "/orders", "description": "Place a coffee order"}],
    "db_schema": [{"table": "orders", "columns": ["id", "user_id", "status"]}],
    "edge_cases": ["card payment declined"]
}"#;

/// In-memory record store for asserting persistence behavior
#[derive(Default)]
struct VecSpecStore {
    rows: Vec<StoredRecord>,
}

impl SpecStore for VecSpecStore {
    type Error = String;

    fn insert_record(&mut self, record: &StoredRecord) -> Result<i64, String> {
        self.rows.push(record.clone());
        Ok(self.rows.len() as i64)
    }

    fn records_for_user(&self, user_id: &str) -> Result<Vec<SpecRecord>, String> {
        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.user_id == user_id)
            .map(|(i, r)| SpecRecord {
                id: i as i64 + 1,
                user_id: r.user_id.clone(),
                raw_filename: r.raw_filename.clone(),
                content: r.content.clone(),
                created_at: "2026-01-01 00:00:00".to_string(),
            })
            .collect())
    }
}

/// Record store that always fails
struct FailingSpecStore;

impl SpecStore for FailingSpecStore {
    type Error = String;

    fn insert_record(&mut self, _record: &StoredRecord) -> Result<i64, String> {
        Err("database unavailable".to_string())
    }

    fn records_for_user(&self, _user_id: &str) -> Result<Vec<SpecRecord>, String> {
        Err("database unavailable".to_string())
    }
}

/// In-memory artifact store
#[derive(Default)]
struct MemArtifactStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl ArtifactStore for MemArtifactStore {
    type Error = String;

    fn put(&self, key: &str, bytes: &[u8]) -> Result<(), String> {
        self.blobs
            .lock()
            .unwrap()
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// Artifact store that always fails
struct FailingArtifactStore;

impl ArtifactStore for FailingArtifactStore {
    type Error = String;

    fn put(&self, _key: &str, _bytes: &[u8]) -> Result<(), String> {
        Err("bucket unavailable".to_string())
    }
}

fn identity() -> UserIdentity {
    UserIdentity::new("user-1", 2_000_000_000)
}

#[tokio::test]
async fn test_scenario_a_coffee_shop_success() {
    let provider = MockProvider::new(COFFEE_RESPONSE);
    let generator = Generator::new(provider, PipelineConfig::default());

    let spec = generator
        .generate(RequirementInput::PlainText(COFFEE_INPUT.to_string()))
        .await
        .unwrap();

    assert_eq!(
        spec.modules,
        vec!["coffee ordering", "payment", "admin order view"]
    );
    assert!(!spec.user_stories.is_empty());
    assert!(!spec.api_specs.is_empty());
    assert!(!spec.db_schema.is_empty());
    assert!(!spec.edge_cases.is_empty());

    // Persistence failure must not change the success outcome.
    let coordinator = PersistenceCoordinator::new(FailingArtifactStore, FailingSpecStore);
    let outcome = coordinator.persist(&identity(), "input.txt", spec.clone(), Some(b"raw".as_slice()));
    assert_eq!(
        outcome,
        PersistOutcome {
            artifact_stored: false,
            record_stored: false,
        }
    );
    // The structured result is still in hand, untouched.
    assert_eq!(spec.modules.len(), 3);
}

#[tokio::test]
async fn test_scenario_b_malformed_pdf_fails_at_extraction() {
    let provider = MockProvider::new(COFFEE_RESPONSE);
    let generator = Generator::new(provider.clone(), PipelineConfig::default());

    let failure = generator
        .generate(RequirementInput::PdfDocument(b"definitely not a pdf".to_vec()))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::Extraction);
    assert!(failure.message.contains("malformed"));
    // Extraction short-circuits: the provider is never called.
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn test_scenario_c_slow_completion_times_out() {
    let provider = MockProvider::new(COFFEE_RESPONSE).with_delay(Duration::from_secs(5));
    let config = PipelineConfig {
        completion_timeout_secs: 1,
    };
    let generator = Generator::new(provider, config);

    let start = std::time::Instant::now();
    let failure = generator
        .generate(RequirementInput::PlainText(COFFEE_INPUT.to_string()))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::Completion);
    // Bounded by the configured timeout, not the provider's latency.
    assert!(start.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_unusable_model_output_fails_at_validation() {
    let provider = MockProvider::new("Here are your specs: modules, stories...");
    let generator = Generator::new(provider, PipelineConfig::default());

    let failure = generator
        .generate(RequirementInput::PlainText(COFFEE_INPUT.to_string()))
        .await
        .unwrap_err();

    assert_eq!(failure.stage, Stage::Validation);
}

#[tokio::test]
async fn test_fenced_model_output_still_succeeds() {
    let provider = MockProvider::new(format!("```json\n{}\n```", COFFEE_RESPONSE));
    let generator = Generator::new(provider, PipelineConfig::default());

    let spec = generator
        .generate(RequirementInput::PlainText(COFFEE_INPUT.to_string()))
        .await
        .unwrap();
    assert_eq!(spec.modules.len(), 3);
}

#[test]
fn test_persist_stores_artifact_and_record() {
    let coordinator = PersistenceCoordinator::new(MemArtifactStore::default(), VecSpecStore::default());

    let outcome = coordinator.persist(
        &identity(),
        "requirements.pdf",
        SpecificationDocument::default(),
        Some(b"%PDF-raw-bytes".as_slice()),
    );

    assert!(outcome.artifact_stored);
    assert!(outcome.record_stored);

    let records = coordinator.records();
    let store = records.lock().unwrap();
    let rows = store.records_for_user("user-1").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].raw_filename, "requirements.pdf");
}

#[test]
fn test_persist_without_raw_bytes_skips_archive() {
    let coordinator = PersistenceCoordinator::new(MemArtifactStore::default(), VecSpecStore::default());

    let outcome = coordinator.persist(
        &identity(),
        "manual_text_input.txt",
        SpecificationDocument::default(),
        None,
    );

    assert!(!outcome.artifact_stored);
    assert!(outcome.record_stored);
}

#[test]
fn test_records_are_not_deduplicated() {
    let coordinator = PersistenceCoordinator::new(MemArtifactStore::default(), VecSpecStore::default());

    let doc = SpecificationDocument::default();
    coordinator.persist(&identity(), "same.txt", doc.clone(), None);
    coordinator.persist(&identity(), "same.txt", doc, None);

    let records = coordinator.records();
    let store = records.lock().unwrap();
    assert_eq!(store.records_for_user("user-1").unwrap().len(), 2);
}

#[test]
fn test_artifact_failure_does_not_block_record_insert() {
    let coordinator = PersistenceCoordinator::new(FailingArtifactStore, VecSpecStore::default());

    let outcome = coordinator.persist(
        &identity(),
        "requirements.pdf",
        SpecificationDocument::default(),
        Some(b"raw".as_slice()),
    );

    assert!(!outcome.artifact_stored);
    assert!(outcome.record_stored);
}
