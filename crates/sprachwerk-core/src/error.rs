// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Sprachwerk.

use thiserror::Error;

/// Top-level error type for all Sprachwerk operations.
#[derive(Debug, Error)]
pub enum SprachwerkError {
    // -- Request validation --
    #[error("No file part in the request")]
    MissingFilePart,

    #[error("No file selected")]
    EmptyFilename,

    #[error("Unsupported file type. Use TXT, DOCX, or PDF.")]
    UnsupportedFileType(String),

    #[error("Invalid output format")]
    InvalidOutputFormat(String),

    #[error("upload exceeds the maximum size of {limit} bytes")]
    UploadTooLarge { limit: usize },

    #[error("malformed upload: {0}")]
    MalformedUpload(String),

    #[error("output file not found: {0}")]
    ArtifactNotFound(String),

    // -- Document errors --
    #[error("Unsupported file type. Please upload TXT, DOCX, or PDF. (got {0:?})")]
    UnsupportedFormat(String),

    #[error("PDF operation failed: {0}")]
    Pdf(String),

    #[error("DOCX operation failed: {0}")]
    Docx(String),

    // -- Translation --
    #[error("translation provider failed: {0}")]
    Translation(String),

    #[error("translation provider is disabled")]
    TranslationDisabled,

    // -- Runtime / persistence --
    #[error("background task failed: {0}")]
    Task(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// How an error should be surfaced to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself was wrong; reported verbatim, never retried.
    ClientInput,
    /// The upload was larger than the configured ceiling.
    PayloadTooLarge,
    /// A requested artifact does not exist.
    NotFound,
    /// Something failed while staging, extracting, or serializing.
    Processing,
}

impl SprachwerkError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::MissingFilePart
            | Self::EmptyFilename
            | Self::UnsupportedFileType(_)
            | Self::InvalidOutputFormat(_)
            | Self::MalformedUpload(_) => ErrorClass::ClientInput,
            Self::UploadTooLarge { .. } => ErrorClass::PayloadTooLarge,
            Self::ArtifactNotFound(_) => ErrorClass::NotFound,
            _ => ErrorClass::Processing,
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SprachwerkError>;
