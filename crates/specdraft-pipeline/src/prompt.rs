//! Prompt construction for specification generation

use specdraft_domain::ExtractedDocument;

/// A fully rendered prompt, ready for the completion service.
///
/// Contains exactly one embedded document and no other request-specific
/// content; there is no conversation history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPrompt(String);

impl RenderedPrompt {
    /// The prompt text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the prompt is empty (never the case for a rendered template)
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The instruction template embedding a requirements document.
///
/// The template is an explicit immutable configuration value rather than a
/// hidden module-level constant, so tests can substitute alternates without
/// touching the rendering logic. Rendering is total over any document,
/// including the empty one, and never truncates or summarizes.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    system_instruction: String,
    schema_example: String,
}

impl PromptTemplate {
    /// Build a template from its two fixed parts
    pub fn new(
        system_instruction: impl Into<String>,
        schema_example: impl Into<String>,
    ) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            schema_example: schema_example.into(),
        }
    }

    /// Render the prompt for one document.
    ///
    /// The full document is embedded verbatim regardless of length; output
    /// bounds are the completion client's concern.
    pub fn render(&self, doc: &ExtractedDocument) -> RenderedPrompt {
        let mut prompt = String::with_capacity(
            self.system_instruction.len() + self.schema_example.len() + doc.as_str().len() + 160,
        );

        prompt.push_str(&self.system_instruction);
        prompt.push_str("\n\n");
        prompt.push_str("Convert the following requirements into a structured JSON format.\n\n");
        prompt.push_str("RAW REQUIREMENTS:\n---\n");
        prompt.push_str(doc.as_str());
        prompt.push_str("\n---\n\n");
        prompt.push_str("Return ONLY a valid JSON object with this exact structure:\n");
        prompt.push_str(&self.schema_example);

        RenderedPrompt(prompt)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::new(SYSTEM_INSTRUCTION, SCHEMA_EXAMPLE)
    }
}

const SYSTEM_INSTRUCTION: &str = "You are an expert Product Manager. \
You strictly output valid JSON. Do not include markdown blocks like ```json, \
and do not add prose before or after the JSON object.";

const SCHEMA_EXAMPLE: &str = r#"{
    "modules": ["feature 1", "feature 2"],
    "user_stories": ["As a... I want to..."],
    "api_specs": [{"method": "GET", "path": "/url", "description": "text"}],
    "db_schema": [{"table": "name", "columns": ["col1", "col2"]}],
    "edge_cases": ["case 1"]
}"#;
