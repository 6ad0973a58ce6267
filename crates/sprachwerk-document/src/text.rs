// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-text documents.

use std::path::Path;

use sprachwerk_core::error::Result;
use tracing::{debug, warn};

/// Read a text file as UTF-8, replacing invalid byte sequences with U+FFFD.
pub fn read_text_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    if let std::borrow::Cow::Owned(_) = text {
        warn!(path = %path.display(), "Text file contained invalid UTF-8, replaced");
    }
    debug!(bytes = bytes.len(), "Text file read");
    Ok(text.into_owned())
}

/// Write `text` verbatim as UTF-8 to a file that must not already exist.
pub fn write_text_file(text: &str, path: &Path) -> Result<()> {
    crate::artifact::write_new(path, text.as_bytes())
}
