// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DOCX module — paragraph text extraction and line-per-paragraph rendering
// using `docx-rs`.

pub mod reader;
pub mod writer;

pub use reader::DocxReader;
pub use writer::DocxWriter;
