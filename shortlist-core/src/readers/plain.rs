use super::{has_extension, DocumentReader, ReadError};
use std::path::Path;

/// Plain-text resumes. Invalid UTF-8 is replaced rather than rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextReader;

impl PlainTextReader {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentReader for PlainTextReader {
    fn read_bytes(&self, bytes: &[u8]) -> Result<String, ReadError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn name(&self) -> &str {
        "PlainTextReader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "text", "md"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lossy_decoding() {
        let text = PlainTextReader::new()
            .read_bytes(b"python \xff developer")
            .unwrap();
        assert_eq!(text, "python \u{fffd} developer");
    }

    #[test]
    fn test_supported_extensions() {
        let reader = PlainTextReader::new();
        assert!(reader.supports_file_type(Path::new("a.txt")));
        assert!(reader.supports_file_type(Path::new("a.TEXT")));
        assert!(reader.supports_file_type(Path::new("a.md")));
        assert!(!reader.supports_file_type(Path::new("a.pdf")));
    }
}
