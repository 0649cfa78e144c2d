//! The canonical specification document produced by the pipeline

use serde::{Deserialize, Serialize};

/// A single API endpoint description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSpec {
    /// HTTP method (e.g. "GET", "POST")
    pub method: String,

    /// Endpoint path (e.g. "/orders")
    pub path: String,

    /// Human-readable description of the endpoint
    pub description: String,
}

/// A single database table description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Table name
    pub table: String,

    /// Column names in order
    pub columns: Vec<String>,
}

/// The canonical structured specification.
///
/// All five fields are always present after validation: a field the model
/// omitted is an empty sequence, never absent. The document is immutable
/// once produced; it is both the unit returned to the caller and the unit
/// persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationDocument {
    /// Short feature-name strings, in order
    #[serde(default)]
    pub modules: Vec<String>,

    /// "As a ... I want to ..." stories, stored as-is
    #[serde(default)]
    pub user_stories: Vec<String>,

    /// API endpoint descriptions
    #[serde(default)]
    pub api_specs: Vec<ApiSpec>,

    /// Database table descriptions
    #[serde(default)]
    pub db_schema: Vec<TableSchema>,

    /// Edge cases the requirements imply
    #[serde(default)]
    pub edge_cases: Vec<String>,
}

impl SpecificationDocument {
    /// True when every field is empty (the degenerate-but-valid document)
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
            && self.user_stories.is_empty()
            && self.api_specs.is_empty()
            && self.db_schema.is_empty()
            && self.edge_cases.is_empty()
    }
}
