//! Parse raw completion output into the canonical specification

use crate::error::ValidationError;
use serde_json::Value;
use specdraft_domain::SpecificationDocument;

/// Validate raw model output against the specification schema.
///
/// The raw text may carry incidental code-fence wrapping, which is stripped
/// before parsing; the upstream model is known to emit it despite
/// instructions. After a successful parse, any of the five recognized
/// fields that is absent becomes an empty sequence and unrecognized extra
/// fields are ignored. A field present with the wrong shape is a hard
/// `SchemaMismatch`, never a best-effort repair.
///
/// # Errors
///
/// - `NotWellFormed` when the text is not valid JSON at all
/// - `SchemaMismatch` when it parses but is not an object matching the schema
pub fn validate(raw: &str) -> Result<SpecificationDocument, ValidationError> {
    let json_str = strip_code_fences(raw);

    let value: Value = serde_json::from_str(&json_str)
        .map_err(|e| ValidationError::NotWellFormed(e.to_string()))?;

    if !value.is_object() {
        return Err(ValidationError::SchemaMismatch(
            "expected a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| ValidationError::SchemaMismatch(e.to_string()))
}

/// Strip a markdown code fence around the payload, if present.
///
/// Idempotent: stripped output never starts with a fence marker.
fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let lines: Vec<&str> = trimmed.lines().collect();
    if lines.len() < 2 {
        // Fence opened and closed on one line, e.g. ```json {...} ```
        let inner = trimmed.trim_start_matches("```");
        let inner = inner.strip_suffix("```").unwrap_or(inner);
        let inner = inner.strip_prefix("json").unwrap_or(inner);
        return inner.trim().to_string();
    }

    // Drop the opening line (``` or ```json) and a closing ``` line if any.
    let end = if lines[lines.len() - 1].trim() == "```" {
        lines.len() - 1
    } else {
        lines.len()
    };

    lines[1..end].join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_DOCUMENT: &str = r#"{
        "modules": ["coffee ordering", "payment"],
        "user_stories": ["As a user I want to buy coffee"],
        "api_specs": [{"method": "POST", "path": "/orders", "description": "Place an order"}],
        "db_schema": [{"table": "orders", "columns": ["id", "user_id"]}],
        "edge_cases": ["payment declined"]
    }"#;

    #[test]
    fn test_valid_document_parses() {
        let doc = validate(FULL_DOCUMENT).unwrap();
        assert_eq!(doc.modules, vec!["coffee ordering", "payment"]);
        assert_eq!(doc.api_specs[0].method, "POST");
        assert_eq!(doc.db_schema[0].table, "orders");
    }

    #[test]
    fn test_all_five_fields_always_present() {
        let doc = validate(r#"{"modules": ["a"]}"#).unwrap();
        assert_eq!(doc.modules, vec!["a"]);
        assert!(doc.user_stories.is_empty());
        assert!(doc.api_specs.is_empty());
        assert!(doc.db_schema.is_empty());
        assert!(doc.edge_cases.is_empty());
    }

    #[test]
    fn test_unrecognized_fields_are_ignored() {
        let doc = validate(r#"{"modules": ["a"], "notes": "extra"}"#).unwrap();
        assert_eq!(doc.modules, vec!["a"]);
    }

    #[test]
    fn test_fenced_output_equals_unfenced() {
        let fenced = format!("```json\n{}\n```", FULL_DOCUMENT);
        assert_eq!(validate(&fenced).unwrap(), validate(FULL_DOCUMENT).unwrap());

        let bare_fence = format!("```\n{}\n```", FULL_DOCUMENT);
        assert_eq!(validate(&bare_fence).unwrap(), validate(FULL_DOCUMENT).unwrap());
    }

    #[test]
    fn test_single_line_fence_is_stripped() {
        let fenced = r#"```json {"modules": ["a"]} ```"#;
        let doc = validate(fenced).unwrap();
        assert_eq!(doc.modules, vec!["a"]);

        let bare = r#"```{"modules": ["a"]}```"#;
        assert_eq!(validate(bare).unwrap(), doc);
    }

    #[test]
    fn test_fence_stripping_is_idempotent() {
        let fenced = format!("```json\n{}\n```", FULL_DOCUMENT);
        let once = strip_code_fences(&fenced);
        let twice = strip_code_fences(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_fence_stripping_tolerates_surrounding_whitespace() {
        let fenced = format!("\n\n   ```json\n{}\n```  \n", FULL_DOCUMENT);
        assert_eq!(validate(&fenced).unwrap(), validate(FULL_DOCUMENT).unwrap());
    }

    #[test]
    fn test_invalid_syntax_is_not_well_formed() {
        let result = validate("I could not produce JSON, sorry.");
        match result {
            Err(ValidationError::NotWellFormed(_)) => {}
            other => panic!("expected NotWellFormed, got {:?}", other),
        }
    }

    #[test]
    fn test_scalar_modules_is_schema_mismatch() {
        let result = validate(r#"{"modules": "coffee ordering"}"#);
        match result {
            Err(ValidationError::SchemaMismatch(_)) => {}
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_top_level_array_is_schema_mismatch() {
        let result = validate(r#"["coffee ordering"]"#);
        assert!(matches!(result, Err(ValidationError::SchemaMismatch(_))));
    }

    #[test]
    fn test_wrong_shape_inside_api_specs_is_schema_mismatch() {
        let result = validate(r#"{"api_specs": ["GET /orders"]}"#);
        assert!(matches!(result, Err(ValidationError::SchemaMismatch(_))));
    }

    #[test]
    fn test_empty_object_yields_empty_document() {
        let doc = validate("{}").unwrap();
        assert!(doc.is_empty());
    }
}
