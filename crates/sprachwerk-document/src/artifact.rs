// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output artifacts — uniquely named files in the output directory, one per
// processed request.
//
// Names follow `converted_<8 hex>.<ext>`. Files are opened with create-new
// semantics, so an existing artifact is never overwritten; a name collision
// surfaces as an I/O error rather than silently clobbering another request's
// output. A write that fails halfway removes the file it created.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use sprachwerk_core::DocumentFormat;
use sprachwerk_core::error::Result;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

use crate::docx::DocxWriter;
use crate::pdf::PdfWriter;
use crate::text;

/// Prefix shared by every generated artifact.
pub const ARTIFACT_PREFIX: &str = "converted_";

/// Fresh artifact file name for `format`, e.g. `converted_3f9a0c1e.pdf`.
pub fn artifact_name(format: DocumentFormat) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{ARTIFACT_PREFIX}{}.{}", &token[..8], format.extension())
}

/// Write `bytes` to `path`, failing if the file already exists.
pub(crate) fn write_new(path: &Path, bytes: &[u8]) -> Result<()> {
    write_new_with(path, |file| Ok(file.write_all(bytes)?))
}

/// Create `path` (which must not exist) and hand it to `write`.
///
/// On any failure after creation the partial file is deleted before the
/// error is returned.
pub(crate) fn write_new_with<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut File) -> Result<()>,
{
    let mut file = OpenOptions::new().write(true).create_new(true).open(path)?;
    let written = write(&mut file).and_then(|()| Ok(file.sync_all()?));
    if written.is_err() {
        drop(file);
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), %err, "Could not remove partial artifact");
        }
    }
    written
}

/// Render `text` as `format` into a new artifact under `output_dir` and
/// return its path.
#[instrument(skip(text, output_dir), fields(format = %format, text_len = text.len()))]
pub fn write_artifact(text: &str, format: DocumentFormat, output_dir: &Path) -> Result<PathBuf> {
    let path = output_dir.join(artifact_name(format));

    match format {
        DocumentFormat::PlainText => text::write_text_file(text, &path)?,
        DocumentFormat::WordProcessor => DocxWriter::new().write_text_to_file(text, &path)?,
        DocumentFormat::PortableDocument => PdfWriter::new().write_text_to_file(text, &path)?,
    }

    debug!(path = %path.display(), "Artifact written");
    Ok(path)
}
