// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Processing pipeline — stage → extract → detect → translate → serialize.
//
// File and document work runs on the blocking pool; only the translation
// call is awaited on the async runtime.

use axum::body::Bytes;
use sprachwerk_core::error::{Result, SprachwerkError};
use sprachwerk_core::{DocumentFormat, ProcessOutcome, ServiceConfig};
use sprachwerk_document::{extract_text, write_artifact};
use sprachwerk_translate::{Translator, detect_language};
use tokio::task::spawn_blocking;
use tracing::{info, instrument};

use crate::staging::{StagedUpload, stage_upload};

/// A request that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    /// File name as the client sent it.
    pub file_name: String,
    pub input_format: DocumentFormat,
    pub output_format: DocumentFormat,
    /// Normalised target language code.
    pub target_lang: String,
    pub bytes: Bytes,
}

/// Run one upload through the whole pipeline.
#[instrument(
    skip_all,
    fields(
        file = %upload.file_name,
        input = %upload.input_format,
        output = %upload.output_format,
        target = %upload.target_lang,
    )
)]
pub async fn run(
    config: &ServiceConfig,
    translator: &Translator,
    upload: ValidatedUpload,
) -> Result<ProcessOutcome> {
    let ValidatedUpload {
        file_name,
        input_format,
        output_format,
        target_lang,
        bytes,
    } = upload;

    let upload_dir = config.upload_dir.clone();
    let keep = config.keep_uploads;
    let (staged, text) = blocking(move || {
        let staged = stage_upload(&upload_dir, &file_name, input_format, &bytes, keep)?;
        let text = extract_text(staged.path(), staged.format())?;
        Ok::<(StagedUpload, String), SprachwerkError>((staged, text))
    })
    .await?;

    let detected_lang = detect_language(&text);
    let translated = translator.translate(&text, Some(&target_lang)).await;

    let output_dir = config.output_dir.clone();
    let artifact =
        blocking(move || write_artifact(&translated, output_format, &output_dir)).await?;

    let output_name = artifact
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            SprachwerkError::Task(format!("unnamed artifact path {}", artifact.display()))
        })?
        .to_string();

    info!(
        source_sha256 = %staged.digest(),
        detected = %detected_lang,
        artifact = %output_name,
        "Document processed"
    );
    drop(staged);

    Ok(ProcessOutcome::success(detected_lang, target_lang, output_name))
}

/// Run blocking work on the blocking pool, surfacing a panicked or
/// cancelled task as [`SprachwerkError::Task`].
async fn blocking<T, F>(work: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    spawn_blocking(work)
        .await
        .map_err(|err| SprachwerkError::Task(err.to_string()))?
}
