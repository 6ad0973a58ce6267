// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload staging — put the uploaded bytes on disk under a safe, unique name
// so the document readers can open them.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use sprachwerk_core::DocumentFormat;
use sprachwerk_core::error::Result;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// Used when nothing of the client's file name survives sanitization.
const FALLBACK_STEM: &str = "upload";

/// Reduce a client-supplied file name to a safe single path component.
///
/// Non-ASCII characters are dropped, path separators become spaces,
/// whitespace runs collapse to `_`, and only `[A-Za-z0-9._-]` is kept.
/// Leading and trailing `.`/`_` are stripped, so the result can never be
/// `..` or a hidden file. May return an empty string.
pub fn sanitize_filename(name: &str) -> String {
    let spaced: String = name
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    let kept: String = joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    kept.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Lowercase hex SHA-256 digest of `data`.
pub fn fingerprint(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Staged file name: `<8 hex>_<sanitized stem>.<ext>`.
///
/// The extension comes from the validated format, not the client's name.
pub fn staged_name(original: &str, format: DocumentFormat) -> String {
    let raw_stem = original.rsplit_once('.').map_or(original, |(stem, _)| stem);
    let sanitized = sanitize_filename(raw_stem);
    let stem = if sanitized.is_empty() {
        FALLBACK_STEM
    } else {
        sanitized.as_str()
    };

    let token = Uuid::new_v4().simple().to_string();
    format!("{}_{}.{}", &token[..8], stem, format.extension())
}

/// An upload written to the staging directory.
///
/// The file is removed when the value is dropped unless it was staged with
/// `keep` set.
#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    format: DocumentFormat,
    digest: String,
    keep: bool,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> DocumentFormat {
        self.format
    }

    /// SHA-256 of the staged bytes.
    pub fn digest(&self) -> &str {
        &self.digest
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        if self.keep {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed staged upload"),
            Err(err) => warn!(path = %self.path.display(), %err, "Could not remove staged upload"),
        }
    }
}

/// Write `bytes` into `upload_dir` under a fresh staged name.
#[instrument(skip(upload_dir, bytes), fields(bytes_len = bytes.len()))]
pub fn stage_upload(
    upload_dir: &Path,
    original_name: &str,
    format: DocumentFormat,
    bytes: &[u8],
    keep: bool,
) -> Result<StagedUpload> {
    let path = upload_dir.join(staged_name(original_name, format));

    let mut file = OpenOptions::new().write(true).create_new(true).open(&path)?;
    let staged = StagedUpload {
        path,
        format,
        digest: fingerprint(bytes),
        keep,
    };
    file.write_all(bytes)?;
    file.sync_all()?;

    info!(
        path = %staged.path.display(),
        size = bytes.len(),
        sha256 = %staged.digest,
        "Upload staged"
    );
    Ok(staged)
}
