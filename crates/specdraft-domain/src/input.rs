//! Requirement input forms and the extracted plain-text document

use std::fmt;

/// An input payload as received at the request boundary.
///
/// Constructed once, consumed once by the Text Extractor, discarded after.
#[derive(Debug, Clone)]
pub enum RequirementInput {
    /// A plain-text requirements document
    PlainText(String),

    /// A PDF byte stream
    PdfDocument(Vec<u8>),
}

impl RequirementInput {
    /// Byte length of the payload
    pub fn len(&self) -> usize {
        match self {
            RequirementInput::PlainText(s) => s.len(),
            RequirementInput::PdfDocument(b) => b.len(),
        }
    }

    /// True when the payload carries no bytes at all
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A single plain-text document produced by the Text Extractor.
///
/// Owned exclusively by one pipeline invocation. May be empty when the
/// source was a structurally valid but textless document; emptiness is not
/// an extraction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDocument(String);

impl ExtractedDocument {
    /// Wrap extracted text
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The extracted text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when no text was extracted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume the document, yielding the text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ExtractedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_len() {
        let text = RequirementInput::PlainText("hello".to_string());
        assert_eq!(text.len(), 5);
        assert!(!text.is_empty());

        let pdf = RequirementInput::PdfDocument(vec![]);
        assert!(pdf.is_empty());
    }

    #[test]
    fn test_extracted_document_round_trip() {
        let doc = ExtractedDocument::new("requirements text");
        assert_eq!(doc.as_str(), "requirements text");
        assert!(!doc.is_empty());
        assert_eq!(doc.into_string(), "requirements text");
    }

    #[test]
    fn test_empty_extracted_document() {
        let doc = ExtractedDocument::new("");
        assert!(doc.is_empty());
    }
}
