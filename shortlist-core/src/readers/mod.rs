//! Document Readers
//!
//! This module turns resume files into plain text for the rule engine.
//! Readers only extract text; everything after this boundary works on
//! strings and is format-agnostic.
//!
//! ## Architecture
//!
//! ```text
//! Resume file (PDF, DOCX, TXT)
//!     ↓
//! [FormatDispatcher] -> picks a reader by extension
//!     ↓
//! [Format-specific DocumentReader]
//!     ↓
//! String (raw text)
//!     ↓
//! [RuleEngine]
//! ```
//!
//! ## Available Readers
//!
//! - `PdfReader` - PDF text layer via `pdf-extract` (feature `pdf-backend`)
//! - `DocxReader` - Word documents, `word/document.xml` paragraphs
//! - `PlainTextReader` - `.txt`, `.text` and `.md` files

pub mod dispatch;
pub mod docx;
#[cfg(feature = "pdf-backend")]
pub mod pdf;
pub mod plain;

use std::path::Path;
use thiserror::Error;

pub use dispatch::FormatDispatcher;
pub use docx::DocxReader;
#[cfg(feature = "pdf-backend")]
pub use pdf::PdfReader;
pub use plain::PlainTextReader;

/// Why a single document could not produce text.
/// Never fatal for a batch: the pipeline skips the document and records it.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed document: {0}")]
    Malformed(String),

    #[error("empty")]
    Empty,
}

/// DocumentReader trait - converts one resume document to raw text
pub trait DocumentReader {
    /// Extract the text of an in-memory document
    fn read_bytes(&self, bytes: &[u8]) -> Result<String, ReadError>;

    /// Reads the file and extracts the bytes
    fn read_file(&self, path: &Path) -> Result<String, ReadError> {
        let bytes = std::fs::read(path)?;
        self.read_bytes(&bytes)
    }

    /// Get reader name for debugging/logging
    fn name(&self) -> &str;

    /// Check if reader supports the given file type
    fn supports_file_type(&self, path: &Path) -> bool;
}

/// Case-insensitive extension check shared by the readers
pub(crate) fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => {
            let extension = extension.to_lowercase();
            accepted.iter().any(|a| *a == extension)
        }
        None => false,
    }
}
