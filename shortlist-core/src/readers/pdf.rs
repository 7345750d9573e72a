//! PDF Reader
//!
//! Extracts the text layer of a PDF with `pdf-extract`. Scanned PDFs without
//! a text layer yield no words and rank with a zero score.

use super::{has_extension, DocumentReader, ReadError};
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

#[derive(Debug, Default, Clone, Copy)]
pub struct PdfReader;

impl PdfReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PdfReader {
    fn read_bytes(&self, bytes: &[u8]) -> Result<String, ReadError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ReadError::Malformed("missing %PDF header".to_string()));
        }

        // pdf-extract panics on some malformed inputs instead of returning Err
        let extracted = panic::catch_unwind(AssertUnwindSafe(|| {
            pdf_extract::extract_text_from_mem(bytes)
        }))
        .map_err(|_| ReadError::Malformed("PDF parser aborted".to_string()))?;

        extracted.map_err(|e| ReadError::Malformed(e.to_string()))
    }

    fn name(&self) -> &str {
        "PdfReader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["pdf"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_pdf_bytes() {
        let result = PdfReader::new().read_bytes(b"just some text");
        assert!(matches!(result, Err(ReadError::Malformed(_))));
    }

    #[test]
    fn test_truncated_pdf_is_malformed() {
        let result = PdfReader::new().read_bytes(b"%PDF-1.4\n%%EOF");
        assert!(matches!(result, Err(ReadError::Malformed(_))));
    }

    #[test]
    fn test_supports_pdf_only() {
        let reader = PdfReader::new();
        assert!(reader.supports_file_type(Path::new("resume.pdf")));
        assert!(!reader.supports_file_type(Path::new("resume.docx")));
    }
}
