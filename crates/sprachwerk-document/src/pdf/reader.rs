// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open existing PDF documents and pull their text out page by
// page using the `lopdf` crate.

use std::path::Path;

use lopdf::Document;
use sprachwerk_core::error::SprachwerkError;
use tracing::{debug, info, instrument, warn};

/// Reads text from existing PDF files.
///
/// Wraps `lopdf::Document`. Extraction is lenient: a page whose content
/// stream cannot be decoded contributes an empty string instead of failing
/// the whole document.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SprachwerkError> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            SprachwerkError::Pdf(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, SprachwerkError> {
        let document = Document::load_mem(data).map_err(|err| {
            SprachwerkError::Pdf(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Text of every page, in page order.
    ///
    /// A page that fails to extract yields `""` and a warning; it never
    /// aborts extraction of the remaining pages.
    pub fn page_texts(&self) -> Vec<String> {
        // lopdf keys pages by 1-indexed page number in a BTreeMap, so
        // iteration order is page order.
        self.document
            .get_pages()
            .keys()
            .map(|&page_number| {
                self.document
                    .extract_text(&[page_number])
                    .unwrap_or_else(|err| {
                        warn!(
                            page_number,
                            source = self.source_path.as_deref().unwrap_or("<memory>"),
                            %err,
                            "Page text extraction failed, using empty text"
                        );
                        String::new()
                    })
            })
            .collect()
    }

    /// All page texts joined with newlines, trimmed at both ends.
    #[instrument(skip(self), fields(pages = self.page_count()))]
    pub fn extract_text(&self) -> String {
        let text = self.page_texts().join("\n").trim().to_string();
        debug!(chars = text.chars().count(), "PDF text extracted");
        text
    }
}
