//! Extraction entry points

use crate::error::ExtractionError;
use specdraft_domain::{ExtractedDocument, RequirementInput};
use tracing::debug;

/// Convert an input payload into a single plain-text document.
///
/// The input is consumed; each payload is extracted exactly once per
/// pipeline invocation.
///
/// # Errors
///
/// `MalformedDocument` when a PDF byte stream cannot be parsed. The
/// plain-text branch is the identity transform; its encoding was verified
/// when the input was classified.
pub fn extract(input: RequirementInput) -> Result<ExtractedDocument, ExtractionError> {
    match input {
        RequirementInput::PlainText(text) => Ok(ExtractedDocument::new(text)),
        RequirementInput::PdfDocument(bytes) => extract_pdf(&bytes),
    }
}

/// Classify an uploaded file by extension into a requirement input.
///
/// Filenames ending in `.pdf` (case-insensitive) become PDF byte streams;
/// anything else is treated as plain text and must decode as UTF-8.
///
/// # Errors
///
/// `InvalidEncoding` when a text payload is not valid UTF-8.
pub fn classify_upload(
    filename: &str,
    bytes: Vec<u8>,
) -> Result<RequirementInput, ExtractionError> {
    if filename.to_ascii_lowercase().ends_with(".pdf") {
        Ok(RequirementInput::PdfDocument(bytes))
    } else {
        let text = String::from_utf8(bytes)
            .map_err(|e| ExtractionError::InvalidEncoding(e.to_string()))?;
        Ok(RequirementInput::PlainText(text))
    }
}

/// Extract the text of every page, concatenated in page order.
///
/// A structurally valid document with no embedded text yields an empty
/// document; that is not an error at this layer.
fn extract_pdf(bytes: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes)
        .map_err(|e| ExtractionError::MalformedDocument(e.to_string()))?;

    debug!(page_count = pages.len(), "extracted PDF pages");

    Ok(ExtractedDocument::new(pages.concat()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_identity() {
        let text = "Users can buy coffee and pay by card. Admins see orders.";
        let doc = extract(RequirementInput::PlainText(text.to_string())).unwrap();
        assert_eq!(doc.as_str(), text);
    }

    #[test]
    fn test_empty_plain_text_is_not_an_error() {
        let doc = extract(RequirementInput::PlainText(String::new())).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_malformed_pdf_is_rejected() {
        let result = extract(RequirementInput::PdfDocument(b"not a pdf".to_vec()));
        match result {
            Err(ExtractionError::MalformedDocument(_)) => {}
            other => panic!("expected MalformedDocument, got {:?}", other),
        }
    }

    #[test]
    fn test_txt_upload_classifies_as_text() {
        let input = classify_upload("notes.txt", b"plain requirements".to_vec()).unwrap();
        match input {
            RequirementInput::PlainText(text) => assert_eq!(text, "plain requirements"),
            other => panic!("expected PlainText, got {:?}", other),
        }
    }

    #[test]
    fn test_non_utf8_text_upload_is_rejected() {
        let result = classify_upload("notes.txt", vec![0xff, 0xfe, 0x00, 0x41]);
        match result {
            Err(ExtractionError::InvalidEncoding(_)) => {}
            other => panic!("expected InvalidEncoding, got {:?}", other),
        }
    }

    #[test]
    fn test_pdf_extension_is_case_insensitive() {
        let input = classify_upload("Requirements.PDF", b"garbage".to_vec()).unwrap();
        assert!(matches!(input, RequirementInput::PdfDocument(_)));
    }
}
