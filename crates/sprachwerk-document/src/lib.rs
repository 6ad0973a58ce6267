// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// sprachwerk-document — Document handling for the Sprachwerk translation
// service.
//
// Provides text extraction from TXT, DOCX, and PDF uploads and renders
// translated text back into any of those formats as a uniquely named output
// artifact.

pub mod artifact;
pub mod docx;
pub mod extract;
pub mod pdf;
pub mod text;

// Re-export the primary entry points so callers can use
// `sprachwerk_document::extract_text` etc.
pub use artifact::{artifact_name, write_artifact};
pub use docx::{DocxReader, DocxWriter};
pub use extract::{extract_text, extract_with_extension};
pub use pdf::{PdfReader, PdfWriter};
