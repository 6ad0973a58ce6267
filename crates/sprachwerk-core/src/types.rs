// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Sprachwerk translation pipeline.

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SprachwerkError;

/// Sentinel language code meaning "not determined".
///
/// Returned by detection when the sample is empty or ambiguous, and sent to
/// the translation provider as the source language.
pub const AUTO_LANGUAGE: &str = "auto";

/// Target language used when the caller does not supply one.
pub const DEFAULT_TARGET_LANGUAGE: &str = "en";

/// Document formats accepted for upload and produced for download.
///
/// The input allow-list and the output format set are the same three
/// formats, so one enum serves both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// `.txt` — UTF-8 plain text.
    #[serde(rename = "txt")]
    PlainText,
    /// `.docx` — Office Open XML word-processor document.
    #[serde(rename = "docx")]
    WordProcessor,
    /// `.pdf` — portable document.
    #[serde(rename = "pdf")]
    PortableDocument,
}

impl DocumentFormat {
    pub const ALL: [DocumentFormat; 3] = [
        Self::PlainText,
        Self::WordProcessor,
        Self::PortableDocument,
    ];

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::WordProcessor => "docx",
            Self::PortableDocument => "pdf",
        }
    }

    /// Infer the format from a bare extension (case-insensitive, optional dot).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "txt" => Some(Self::PlainText),
            "docx" => Some(Self::WordProcessor),
            "pdf" => Some(Self::PortableDocument),
            _ => None,
        }
    }

    /// Infer the format from a file name such as `"Report.PDF"`.
    pub fn from_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Parses the `output_format` form keyword (`txt`, `docx`, `pdf`).
///
/// Surrounding whitespace and case are ignored.
impl FromStr for DocumentFormat {
    type Err = SprachwerkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let keyword = s.trim().to_ascii_lowercase();
        match keyword.as_str() {
            "txt" => Ok(Self::PlainText),
            "docx" => Ok(Self::WordProcessor),
            "pdf" => Ok(Self::PortableDocument),
            _ => Err(SprachwerkError::InvalidOutputFormat(keyword)),
        }
    }
}

/// Normalise a requested target language: trimmed, lowercased, and
/// defaulted to [`DEFAULT_TARGET_LANGUAGE`] when absent or blank.
pub fn resolve_target_language(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(code) if !code.is_empty() => code.to_lowercase(),
        _ => DEFAULT_TARGET_LANGUAGE.to_string(),
    }
}

/// Outcome of one successful pipeline run, serialised as the `/process`
/// success body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOutcome {
    pub message: String,
    pub detected_lang: String,
    pub target_lang: String,
    pub output_name: String,
    pub download_url: String,
}

impl ProcessOutcome {
    pub fn success(
        detected_lang: impl Into<String>,
        target_lang: impl Into<String>,
        output_name: impl Into<String>,
    ) -> Self {
        let output_name = output_name.into();
        Self {
            message: "Success".to_string(),
            detected_lang: detected_lang.into(),
            target_lang: target_lang.into(),
            download_url: format!("/download/{output_name}"),
            output_name,
        }
    }
}
