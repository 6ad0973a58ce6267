// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — render translated text as a paginated PDF with `lopdf`.
//
// Text is set in the base-14 Helvetica font with `/WinAnsiEncoding`, so each
// line is transcoded to WinAnsi bytes before it reaches the content stream.
// Characters outside that code page are written as `?`.
//
// Layout is deliberately plain: A4, 20 mm margins, Helvetica 11 pt on a 12 pt
// line pitch. Lines are hard-wrapped by character count, not by measured
// glyph width, so mid-word breaks are expected.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Encoding, Object, ObjectId, Stream, StringFormat, dictionary};
use sprachwerk_core::error::SprachwerkError;
use tracing::{debug, info, instrument};

/// Characters per rendered line before a hard break.
pub const WRAP_CHARS: usize = 95;

/// A4 portrait, in millimetres.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const FONT_SIZE_PT: f32 = 11.0;
const LINE_HEIGHT_PT: f32 = 12.0;

/// Resource name of the body font on every page.
const FONT_NAME: &str = "F1";
const TITLE: &str = "Translated document";

/// Written in place of characters WinAnsi cannot represent.
const REPLACEMENT: u8 = b'?';

fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Creates PDF documents from plain text.
pub struct PdfWriter {
    /// Hard-wrap column.
    wrap_chars: usize,
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfWriter {
    pub fn new() -> Self {
        Self {
            wrap_chars: WRAP_CHARS,
        }
    }

    // -- Text to PDF ----------------------------------------------------------

    /// Render `text` into PDF bytes.
    ///
    /// Empty input still produces a single blank page.
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn create_from_text(&self, text: &str) -> Result<Vec<u8>, SprachwerkError> {
        info!("Creating text PDF");

        let page_w = mm_to_pt(PAGE_WIDTH_MM);
        let page_h = mm_to_pt(PAGE_HEIGHT_MM);
        let margin_pt = mm_to_pt(MARGIN_MM);

        let wrapped_lines = wrap_lines(text, self.wrap_chars);
        let mut layout = paginate(&wrapped_lines, page_h, margin_pt);
        if layout.is_empty() {
            layout.push(Vec::new());
        }

        let font = helvetica();
        let encoding = font
            .get_font_encoding(&Document::new())
            .map_err(|err| SprachwerkError::Pdf(format!("font encoding unavailable: {err}")))?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(font.clone());
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { FONT_NAME => font_id },
        });

        let mut kids: Vec<Object> = Vec::with_capacity(layout.len());
        for placed in &layout {
            let content = page_content(placed, margin_pt, &encoding);
            let content_bytes = content.encode().map_err(|err| {
                SprachwerkError::Pdf(format!("failed to encode page content: {err}"))
            })?;
            let content_id = doc.add_object(Stream::new(dictionary! {}, content_bytes));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let page_count = kids.len();
        finish_document(&mut doc, pages_id, kids, page_w, page_h);

        debug!(
            total_lines = wrapped_lines.len(),
            pages = page_count,
            "Text layout complete"
        );

        let mut output = Vec::new();
        doc.save_to(&mut output)
            .map_err(|err| SprachwerkError::Pdf(format!("failed to serialise PDF: {err}")))?;

        Ok(output)
    }

    // -- File output convenience ----------------------------------------------

    /// Create a text PDF and write it to a file that must not already exist.
    pub fn write_text_to_file(
        &self,
        text: &str,
        path: impl AsRef<Path>,
    ) -> Result<(), SprachwerkError> {
        let bytes = self.create_from_text(text)?;
        crate::artifact::write_new(path.as_ref(), &bytes)?;
        info!("Wrote text PDF to {}", path.as_ref().display());
        Ok(())
    }
}

// -- Document assembly --------------------------------------------------------

/// Base-14 Helvetica with the Windows code page.
fn helvetica() -> Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    }
}

/// One `BT … ET` block per line, each positioned absolutely.
fn page_content(lines: &[PlacedLine<'_>], x_pt: f32, encoding: &Encoding<'_>) -> Content {
    let mut operations = Vec::with_capacity(lines.len() * 4);
    for line in lines {
        operations.push(Operation::new("BT", vec![]));
        operations.push(Operation::new("Tf", vec![FONT_NAME.into(), FONT_SIZE_PT.into()]));
        operations.push(Operation::new("Td", vec![x_pt.into(), line.y_pt.into()]));
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(
                encode_line(encoding, line.text),
                StringFormat::Literal,
            )],
        ));
        operations.push(Operation::new("ET", vec![]));
    }
    Content { operations }
}

/// Transcode one line for the font's code page.
///
/// Tabs become spaces; anything else the code page lacks becomes `?`, so the
/// rendered line keeps its length.
fn encode_line(encoding: &Encoding<'_>, line: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(line.len());
    let mut buf = [0u8; 4];
    for ch in line.chars() {
        let ch = if ch == '\t' { ' ' } else { ch };
        let encoded = Document::encode_text(encoding, ch.encode_utf8(&mut buf));
        if encoded.is_empty() {
            bytes.push(REPLACEMENT);
        } else {
            bytes.extend_from_slice(&encoded);
        }
    }
    bytes
}

/// Write the page tree, catalog and info dictionary.
fn finish_document(doc: &mut Document, pages_id: ObjectId, kids: Vec<Object>, w: f32, h: f32) {
    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![Object::Integer(0), Object::Integer(0), Object::Real(w), Object::Real(h)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(TITLE),
        "Producer" => Object::string_literal(concat!("sprachwerk ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
}

// -- Layout helpers -----------------------------------------------------------

/// One line of text positioned on a page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine<'a> {
    pub text: &'a str,
    /// Baseline height measured from the bottom edge of the page.
    pub y_pt: f32,
}

/// Hard-wrap every line of `text` into chunks of at most `max_chars`
/// characters.
///
/// Counts Unicode scalar values, so a multi-byte character is never split.
/// Blank lines are kept as empty entries.
pub fn wrap_lines(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut result = Vec::new();

    for line in text.lines() {
        if line.chars().count() <= max_chars {
            result.push(line.to_string());
            continue;
        }
        let chars: Vec<char> = line.chars().collect();
        for chunk in chars.chunks(max_chars) {
            result.push(chunk.iter().collect());
        }
    }

    result
}

/// Assign each line a page and a baseline.
///
/// Drawing starts one margin below the top edge and moves down one line
/// height per line; a new page begins whenever the next baseline would fall
/// below `margin + line height`.
pub fn paginate<'a>(
    lines: &'a [String],
    page_height_pt: f32,
    margin_pt: f32,
) -> Vec<Vec<PlacedLine<'a>>> {
    let top = page_height_pt - margin_pt;
    let floor = margin_pt + LINE_HEIGHT_PT;

    let mut pages: Vec<Vec<PlacedLine<'a>>> = Vec::new();
    let mut current: Vec<PlacedLine<'a>> = Vec::new();
    let mut y = top;

    for line in lines {
        if y < floor {
            pages.push(std::mem::take(&mut current));
            y = top;
        }
        current.push(PlacedLine { text: line, y_pt: y });
        y -= LINE_HEIGHT_PT;
    }

    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;

    fn a4_layout(lines: &[String]) -> Vec<Vec<PlacedLine<'_>>> {
        paginate(lines, mm_to_pt(PAGE_HEIGHT_MM), mm_to_pt(MARGIN_MM))
    }

    #[test]
    fn long_line_wraps_into_fixed_chunks() {
        let line = "x".repeat(200);
        let wrapped = wrap_lines(&line, WRAP_CHARS);
        let lengths: Vec<usize> = wrapped.iter().map(|l| l.chars().count()).collect();
        assert_eq!(lengths, vec![95, 95, 10]);
    }

    #[test]
    fn wrap_keeps_blank_lines_and_short_lines() {
        let wrapped = wrap_lines("alpha\n\nbeta", WRAP_CHARS);
        assert_eq!(wrapped, vec!["alpha", "", "beta"]);
    }

    #[test]
    fn wrap_counts_characters_not_bytes() {
        let line = "é".repeat(100);
        let wrapped = wrap_lines(&line, WRAP_CHARS);
        assert_eq!(wrapped.len(), 2);
        assert_eq!(wrapped[0].chars().count(), 95);
        assert_eq!(wrapped[1], "é".repeat(5));
    }

    #[test]
    fn wrap_breaks_mid_word() {
        let wrapped = wrap_lines("abcdefgh", 3);
        assert_eq!(wrapped, vec!["abc", "def", "gh"]);
    }

    #[test]
    fn a4_page_holds_sixty_lines() {
        let lines: Vec<String> = (0..61).map(|i| format!("line {i}")).collect();
        let pages = a4_layout(&lines);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), 60);
        assert_eq!(pages[1].len(), 1);
        assert_eq!(pages[1][0].text, "line 60");
    }

    #[test]
    fn baselines_descend_from_top_margin() {
        let lines = vec!["a".to_string(), "b".to_string()];
        let pages = a4_layout(&lines);
        let top = mm_to_pt(PAGE_HEIGHT_MM) - mm_to_pt(MARGIN_MM);
        assert!((pages[0][0].y_pt - top).abs() < 0.01);
        assert!((pages[0][0].y_pt - pages[0][1].y_pt - LINE_HEIGHT_PT).abs() < 0.01);
    }

    #[test]
    fn empty_text_renders_one_blank_page() {
        let bytes = PdfWriter::new().create_from_text("").unwrap();
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 1);
        assert!(reader.extract_text().trim().is_empty());
    }

    #[test]
    fn long_text_spans_multiple_pages() {
        let text: String = (0..130).map(|i| format!("row {i}\n")).collect();
        let bytes = PdfWriter::new().create_from_text(&text).unwrap();
        let reader = PdfReader::from_bytes(&bytes).unwrap();
        assert_eq!(reader.page_count(), 3);
    }

    #[test]
    fn latin_accents_survive_a_round_trip() {
        let bytes = PdfWriter::new()
            .create_from_text("Bonjour é\nGrüße aus Köln")
            .unwrap();
        let text = PdfReader::from_bytes(&bytes).unwrap().extract_text();
        assert!(text.contains("Bonjour é"), "extracted: {text:?}");
        assert!(text.contains("Grüße aus Köln"), "extracted: {text:?}");
    }

    #[test]
    fn lines_are_encoded_as_win_ansi() {
        let font = helvetica();
        let encoding = font.get_font_encoding(&Document::new()).unwrap();
        assert_eq!(encode_line(&encoding, "é€"), vec![0xE9, 0x80]);
        assert_eq!(encode_line(&encoding, "a\tb"), b"a b".to_vec());
    }

    #[test]
    fn unencodable_characters_become_question_marks() {
        let bytes = PdfWriter::new().create_from_text("Привет 日本").unwrap();
        let text = PdfReader::from_bytes(&bytes).unwrap().extract_text();
        assert_eq!(text, "?????? ??");
    }

    #[test]
    fn write_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("converted_deadbeef.pdf");
        let writer = PdfWriter::new();
        writer.write_text_to_file("first", &path).unwrap();
        assert!(writer.write_text_to_file("second", &path).is_err());
    }
}
