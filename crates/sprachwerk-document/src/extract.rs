// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text extraction — dispatch a staged upload to the reader for its declared
// format.

use std::path::Path;

use sprachwerk_core::DocumentFormat;
use sprachwerk_core::error::{Result, SprachwerkError};
use tracing::{debug, instrument};

use crate::docx::DocxReader;
use crate::pdf::PdfReader;
use crate::text;

/// Extract the text of the file at `path`, interpreting it as `format`.
///
/// A zero-byte file yields `""` for every format. Extraction only reads;
/// the file is left untouched.
#[instrument(skip(path), fields(path = %path.display(), format = %format))]
pub fn extract_text(path: &Path, format: DocumentFormat) -> Result<String> {
    if std::fs::metadata(path)?.len() == 0 {
        debug!("Empty upload, nothing to extract");
        return Ok(String::new());
    }

    let text = match format {
        DocumentFormat::PlainText => text::read_text_file(path)?,
        DocumentFormat::WordProcessor => DocxReader::open(path)?.extract_text(),
        DocumentFormat::PortableDocument => PdfReader::open(path)?.extract_text(),
    };

    debug!(chars = text.chars().count(), "Extraction complete");
    Ok(text)
}

/// Like [`extract_text`], but takes the declared extension as a string
/// (`"txt"`, `".PDF"`, ...). Anything outside the allow-list fails with
/// [`SprachwerkError::UnsupportedFormat`].
pub fn extract_with_extension(path: &Path, extension: &str) -> Result<String> {
    let format = DocumentFormat::from_extension(extension)
        .ok_or_else(|| SprachwerkError::UnsupportedFormat(extension.to_string()))?;
    extract_text(path, format)
}
