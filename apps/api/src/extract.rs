//! PDF text extraction collaborator boundary.
//!
//! Extraction failure is never a request failure: the pipeline treats an
//! empty string as valid degenerate input, so a corrupt or image-only PDF
//! degrades to an all-zero analysis instead of a 5xx.

use tracing::warn;

/// Extracts plain text from PDF bytes, or an empty string if the document
/// cannot be read.
pub fn extract_text(file_bytes: &[u8]) -> String {
    match pdf_extract::extract_text_from_mem(file_bytes) {
        Ok(text) => text,
        Err(e) => {
            warn!("PDF text extraction failed: {e}");
            String::new()
        }
    }
}
