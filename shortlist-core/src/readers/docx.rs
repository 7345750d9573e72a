//! DOCX Reader
//!
//! A `.docx` file is a zip archive; the body text lives in
//! `word/document.xml`. Each `<w:p>` paragraph becomes one line, `<w:tab/>`
//! becomes a tab and `<w:br/>` / `<w:cr/>` a newline. Only `<w:t>` runs
//! contribute text, so field codes and properties are left out.

use super::{has_extension, DocumentReader, ReadError};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::Path;

const DOCUMENT_PART: &str = "word/document.xml";

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxReader;

impl DocxReader {
    pub fn new() -> Self {
        Self
    }

    /// Step 1: DOCX bytes -> WordprocessingML markup
    fn extract_document_xml(&self, bytes: &[u8]) -> Result<String, ReadError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ReadError::Malformed(format!("not a zip archive: {e}")))?;

        let mut part = archive
            .by_name(DOCUMENT_PART)
            .map_err(|_| ReadError::Malformed(format!("missing {DOCUMENT_PART}")))?;

        let mut xml = String::new();
        part.read_to_string(&mut xml)?;
        Ok(xml)
    }

    /// Step 2: markup -> plain text, one line per paragraph
    fn markup_to_text(&self, xml: &str) -> Result<String, ReadError> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_text_run = false;
        // tab stops inside <w:pPr> are layout, not content
        let mut in_properties = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = true,
                    b"pPr" => in_properties = true,
                    _ => {}
                },
                Ok(Event::Empty(_)) if in_properties => {}
                Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                    b"tab" => text.push('\t'),
                    b"br" | b"cr" | b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Text(e)) if in_text_run => {
                    let run = e
                        .unescape()
                        .map_err(|err| ReadError::Malformed(format!("bad text run: {err}")))?;
                    text.push_str(&run);
                }
                Ok(Event::End(e)) => match e.local_name().as_ref() {
                    b"t" => in_text_run = false,
                    b"pPr" => in_properties = false,
                    b"p" => text.push('\n'),
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(e) => {
                    return Err(ReadError::Malformed(format!(
                        "XML error at position {}: {e}",
                        reader.buffer_position()
                    )))
                }
            }
        }

        Ok(text)
    }
}

impl DocumentReader for DocxReader {
    fn read_bytes(&self, bytes: &[u8]) -> Result<String, ReadError> {
        let xml = self.extract_document_xml(bytes)?;
        self.markup_to_text(&xml)
    }

    fn name(&self) -> &str {
        "DocxReader"
    }

    fn supports_file_type(&self, path: &Path) -> bool {
        has_extension(path, &["docx"])
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::FileOptions;

    /// Minimal in-memory .docx holding the given paragraphs
    pub(crate) fn build_docx(body: &str) -> Vec<u8> {
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
        );
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file("[Content_Types].xml", FileOptions::default())
            .unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_PART, FileOptions::default()).unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_paragraphs_become_lines() {
        let bytes = build_docx(
            "<w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Skills:</w:t></w:r><w:r><w:tab/><w:t xml:space=\"preserve\">Python &amp; SQL</w:t></w:r></w:p>",
        );
        let text = DocxReader::new().read_bytes(&bytes).unwrap();
        assert_eq!(text, "Jane Doe\nSkills:\tPython & SQL\n");
    }

    #[test]
    fn test_line_breaks_and_empty_paragraphs() {
        let bytes = build_docx(
            "<w:p><w:r><w:t>intern</w:t><w:br/><w:t>acme</w:t></w:r></w:p><w:p/>\
             <w:p><w:pPr><w:tabs><w:tab w:val=\"left\" w:pos=\"720\"/></w:tabs></w:pPr><w:r><w:t>Projects</w:t></w:r></w:p>",
        );
        let text = DocxReader::new().read_bytes(&bytes).unwrap();
        assert_eq!(text, "intern\nacme\n\nProjects\n");
    }

    #[test]
    fn test_not_a_zip_is_malformed() {
        let result = DocxReader::new().read_bytes(b"plain text pretending to be docx");
        assert!(matches!(result, Err(ReadError::Malformed(_))));
    }

    #[test]
    fn test_zip_without_document_part_is_malformed() {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer.start_file("other.xml", FileOptions::default()).unwrap();
        writer.write_all(b"<x/>").unwrap();
        let bytes = writer.finish().unwrap().into_inner();

        let err = DocxReader::new().read_bytes(&bytes).unwrap_err();
        assert!(err.to_string().contains("word/document.xml"));
    }
}
