// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX reader — body paragraphs only. Tables, headers, footers, and embedded
// objects are skipped.

use std::path::Path;

use docx_rs::{
    DocumentChild, Docx, InsertChild, Paragraph, ParagraphChild, Run, RunChild, read_docx,
};
use sprachwerk_core::error::SprachwerkError;
use tracing::{debug, info, instrument};

/// Reads paragraph text from Office Open XML word-processor documents.
pub struct DocxReader {
    docx: Docx,
}

impl DocxReader {
    /// Open a `.docx` from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SprachwerkError> {
        let path_ref = path.as_ref();
        info!("Opening DOCX: {}", path_ref.display());
        let bytes = std::fs::read(path_ref)?;
        Self::from_bytes(&bytes)
    }

    /// Parse a `.docx` already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SprachwerkError> {
        let docx = read_docx(data)
            .map_err(|err| SprachwerkError::Docx(format!("failed to parse document: {}", err)))?;
        Ok(Self { docx })
    }

    /// Text of each top-level body paragraph, in document order.
    pub fn paragraphs(&self) -> Vec<String> {
        self.docx
            .document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(paragraph) => Some(paragraph_text(paragraph)),
                _ => None,
            })
            .collect()
    }

    /// Paragraph texts joined with newlines.
    pub fn extract_text(&self) -> String {
        let paragraphs = self.paragraphs();
        debug!(paragraphs = paragraphs.len(), "DOCX text extracted");
        paragraphs.join("\n")
    }
}

/// Concatenate the text runs of one paragraph, including runs nested in
/// hyperlinks and tracked insertions. Tabs and line breaks inside a run
/// become `\t` and `\n`. Tracked deletions are skipped.
fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    push_children(&mut text, &paragraph.children);
    text
}

fn push_children(text: &mut String, children: &[ParagraphChild]) {
    for child in children {
        match child {
            ParagraphChild::Run(run) => push_run(text, run),
            ParagraphChild::Hyperlink(link) => push_children(text, &link.children),
            ParagraphChild::Insert(insert) => {
                for inserted in &insert.children {
                    if let InsertChild::Run(run) = inserted {
                        push_run(text, run);
                    }
                }
            }
            _ => {}
        }
    }
}

fn push_run(text: &mut String, run: &Run) {
    for run_child in &run.children {
        match run_child {
            RunChild::Text(t) => text.push_str(&t.text),
            RunChild::Tab(_) => text.push('\t'),
            RunChild::Break(_) => text.push('\n'),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Hyperlink, HyperlinkType, Insert, Table, TableCell, TableRow};

    fn pack(docx: Docx) -> Vec<u8> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        docx.build().pack(&mut cursor).unwrap();
        cursor.into_inner()
    }

    #[test]
    fn reads_paragraphs_in_order() {
        let bytes = pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Erster Absatz")))
                .add_paragraph(Paragraph::new())
                .add_paragraph(
                    Paragraph::new()
                        .add_run(Run::new().add_text("Zweiter "))
                        .add_run(Run::new().add_text("Absatz")),
                ),
        );
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.paragraphs(), vec!["Erster Absatz", "", "Zweiter Absatz"]);
        assert_eq!(reader.extract_text(), "Erster Absatz\n\nZweiter Absatz");
    }

    #[test]
    fn hyperlink_text_stays_in_its_paragraph() {
        let bytes = pack(
            Docx::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Visit "))
                    .add_hyperlink(
                        Hyperlink::new("https://example.com", HyperlinkType::External)
                            .add_run(Run::new().add_text("our site")),
                    )
                    .add_run(Run::new().add_text(" today")),
            ),
        );
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.extract_text(), "Visit our site today");
    }

    #[test]
    fn tracked_insertions_are_read() {
        let bytes = pack(
            Docx::new().add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Guten "))
                    .add_insert(Insert::new(Run::new().add_text("Morgen"))),
            ),
        );
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.extract_text(), "Guten Morgen");
    }

    #[test]
    fn tables_are_not_captured() {
        let table = Table::new(vec![TableRow::new(vec![TableCell::new().add_paragraph(
            Paragraph::new().add_run(Run::new().add_text("cell text")),
        )])]);
        let bytes = pack(
            Docx::new()
                .add_paragraph(Paragraph::new().add_run(Run::new().add_text("body")))
                .add_table(table),
        );
        let reader = DocxReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.extract_text(), "body");
    }

    #[test]
    fn empty_document_has_no_text() {
        let reader = DocxReader::from_bytes(&pack(Docx::new())).unwrap();
        assert!(reader.extract_text().trim().is_empty());
    }

    #[test]
    fn non_zip_bytes_are_docx_error() {
        let err = DocxReader::from_bytes(b"plain text pretending").err().unwrap();
        assert!(matches!(err, SprachwerkError::Docx(_)));
    }
}
