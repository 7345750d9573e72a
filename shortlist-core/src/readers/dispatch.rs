use super::{DocumentReader, DocxReader, PlainTextReader, ReadError};
use std::path::Path;

/// Routes each document to the first reader that accepts its extension.
///
/// The default set is PDF (when built with `pdf-backend`), DOCX and plain
/// text, in that order.
pub struct FormatDispatcher {
    readers: Vec<Box<dyn DocumentReader>>,
}

impl FormatDispatcher {
    pub fn new() -> Self {
        let mut readers: Vec<Box<dyn DocumentReader>> = Vec::new();
        #[cfg(feature = "pdf-backend")]
        readers.push(Box::new(super::PdfReader::new()));
        readers.push(Box::new(DocxReader::new()));
        readers.push(Box::new(PlainTextReader::new()));
        Self { readers }
    }

    pub fn with_readers(readers: Vec<Box<dyn DocumentReader>>) -> Self {
        Self { readers }
    }

    pub fn reader_for(&self, path: &Path) -> Option<&dyn DocumentReader> {
        self.readers
            .iter()
            .find(|r| r.supports_file_type(path))
            .map(|r| r.as_ref())
    }

    pub fn reader_names(&self) -> Vec<&str> {
        self.readers.iter().map(|r| r.name()).collect()
    }
}

impl Default for FormatDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn describe_extension(path: &Path) -> String {
    match path.extension().and_then(|e| e.to_str()) {
        Some(extension) => format!(".{extension}"),
        None => "no file extension".to_string(),
    }
}

impl DocumentReader for FormatDispatcher {
    /// Without a file name the format is sniffed from the leading bytes
    fn read_bytes(&self, bytes: &[u8]) -> Result<String, ReadError> {
        let hint = if bytes.starts_with(b"%PDF") {
            "document.pdf"
        } else if bytes.starts_with(b"PK\x03\x04") {
            "document.docx"
        } else {
            "document.txt"
        };
        match self.reader_for(Path::new(hint)) {
            Some(reader) => reader.read_bytes(bytes),
            None => Err(ReadError::UnsupportedFormat(hint.to_string())),
        }
    }

    fn read_file(&self, path: &Path) -> Result<String, ReadError> {
        match self.reader_for(path) {
            Some(reader) => {
                tracing::debug!(reader = reader.name(), path = %path.display(), "reading document");
                reader.read_file(path)
            }
            None => Err(ReadError::UnsupportedFormat(describe_extension(path))),
        }
    }

    fn name(&self) -> &str {
        "FormatDispatcher"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        self.reader_for(path).is_some()
    }
}
