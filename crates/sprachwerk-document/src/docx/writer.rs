// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX writer — one paragraph per input line.

use std::path::Path;

use docx_rs::{Docx, Paragraph, Run};
use sprachwerk_core::error::SprachwerkError;
use tracing::{debug, info, instrument};

/// Renders plain text as a word-processor document.
#[derive(Debug, Default)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Build the document model: every line of `text` becomes a paragraph,
    /// blank lines included.
    pub fn build(&self, text: &str) -> Docx {
        let mut docx = Docx::new();
        let mut count = 0usize;
        for line in text.lines() {
            let paragraph = if line.is_empty() {
                Paragraph::new()
            } else {
                Paragraph::new().add_run(Run::new().add_text(line))
            };
            docx = docx.add_paragraph(paragraph);
            count += 1;
        }
        debug!(paragraphs = count, "DOCX model built");
        docx
    }

    /// Render `text` into `.docx` bytes.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn create_from_text(&self, text: &str) -> Result<Vec<u8>, SprachwerkError> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        self.build(text)
            .build()
            .pack(&mut cursor)
            .map_err(|err| SprachwerkError::Docx(format!("failed to pack document: {}", err)))?;
        Ok(cursor.into_inner())
    }

    /// Render `text` straight into a file that must not already exist.
    pub fn write_text_to_file(
        &self,
        text: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), SprachwerkError> {
        let path = path.as_ref();
        let docx = self.build(text);
        crate::artifact::write_new_with(path, |file| {
            docx.build().pack(file).map_err(|err| {
                SprachwerkError::Docx(format!("failed to write {}: {}", path.display(), err))
            })?;
            Ok(())
        })?;
        info!("Wrote DOCX to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::DocxReader;

    #[test]
    fn three_lines_become_three_paragraphs() {
        let bytes = DocxWriter::new().create_from_text("Bonjour\n\nle monde").unwrap();
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.paragraphs(), vec!["Bonjour", "", "le monde"]);
    }

    #[test]
    fn crlf_lines_are_split_cleanly() {
        let bytes = DocxWriter::new().create_from_text("one\r\ntwo").unwrap();
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.paragraphs(), vec!["one", "two"]);
    }

    #[test]
    fn file_output_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("converted_12345678.docx");
        DocxWriter::new().write_text_to_file("Hallo Welt", &path).unwrap();
        let reader = DocxReader::open(&path).unwrap();
        assert_eq!(reader.extract_text(), "Hallo Welt");
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("taken.docx");
        std::fs::write(&path, b"keep me").unwrap();
        assert!(DocxWriter::new().write_text_to_file("new", &path).is_err());
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }
}
