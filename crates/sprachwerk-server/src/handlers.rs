// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Route handlers.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use sprachwerk_core::error::{Result, SprachwerkError};
use sprachwerk_core::{DocumentFormat, ProcessOutcome, resolve_target_language};
use tokio_util::io::ReaderStream;
use tracing::{debug, info, instrument};

use crate::AppState;
use crate::error::ApiError;
use crate::pipeline::{self, ValidatedUpload};

/// Output format used when the form omits `output_format`.
const DEFAULT_OUTPUT_FORMAT: &str = "txt";

pub async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

pub async fn health() -> &'static str {
    "OK"
}

// -- POST /process ------------------------------------------------------------

/// The uploaded file part.
#[derive(Debug)]
pub struct FilePart {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

/// Fields collected from the multipart body, not yet validated.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub target_lang: Option<String>,
    pub output_format: Option<String>,
}

impl UploadForm {
    /// Drain the multipart stream. The first `file` part wins; unknown
    /// fields are ignored.
    pub async fn read(mut multipart: Multipart, limit: usize) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| multipart_error(err, limit))?
        {
            let name = field.name().unwrap_or("").to_string();
            match name.as_str() {
                "file" if form.file.is_none() => {
                    let file_name = field.file_name().map(str::to_string);
                    let bytes = field.bytes().await.map_err(|err| multipart_error(err, limit))?;
                    debug!(file_name = ?file_name, bytes_len = bytes.len(), "Received file part");
                    form.file = Some(FilePart { file_name, bytes });
                }
                "target_lang" => {
                    form.target_lang =
                        Some(field.text().await.map_err(|err| multipart_error(err, limit))?);
                }
                "output_format" => {
                    form.output_format =
                        Some(field.text().await.map_err(|err| multipart_error(err, limit))?);
                }
                other => debug!(field = other, "Ignoring form field"),
            }
        }

        Ok(form)
    }

    /// Check the form in order: file part present, file name non-empty,
    /// extension allow-listed, output format recognised, size within limit.
    ///
    /// A `file` field sent without a `filename` parameter is a plain form
    /// value, not a file part.
    pub fn validate(self, limit: usize) -> Result<ValidatedUpload> {
        let file = self.file.ok_or(SprachwerkError::MissingFilePart)?;

        let file_name = file.file_name.ok_or(SprachwerkError::MissingFilePart)?;
        if file_name.is_empty() {
            return Err(SprachwerkError::EmptyFilename);
        }

        let input_format = DocumentFormat::from_filename(&file_name)
            .ok_or_else(|| SprachwerkError::UnsupportedFileType(file_name.clone()))?;

        let output_format: DocumentFormat = self
            .output_format
            .as_deref()
            .unwrap_or(DEFAULT_OUTPUT_FORMAT)
            .parse()?;

        if file.bytes.len() > limit {
            return Err(SprachwerkError::UploadTooLarge { limit });
        }

        Ok(ValidatedUpload {
            file_name,
            input_format,
            output_format,
            target_lang: resolve_target_language(self.target_lang.as_deref()),
            bytes: file.bytes,
        })
    }
}

fn multipart_error(err: MultipartError, limit: usize) -> SprachwerkError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        SprachwerkError::UploadTooLarge { limit }
    } else {
        SprachwerkError::MalformedUpload(err.body_text())
    }
}

/// `POST /process` — translate an uploaded document.
#[instrument(skip_all)]
pub async fn process(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<ProcessOutcome>, ApiError> {
    // A body that is not multipart at all carries no file part.
    let multipart = multipart.map_err(|rejection| {
        debug!(%rejection, "Request is not multipart");
        SprachwerkError::MissingFilePart
    })?;

    let limit = state.config.max_upload_bytes;
    let upload = UploadForm::read(multipart, limit).await?.validate(limit)?;

    info!(
        file = %upload.file_name,
        output = %upload.output_format,
        target = %upload.target_lang,
        "Processing upload"
    );

    let outcome = pipeline::run(&state.config, &state.translator, upload).await?;
    Ok(Json(outcome))
}

// -- GET /download/{filename} ---------------------------------------------------

/// True for names made only of `[A-Za-z0-9._-]` that do not start with a dot,
/// i.e. a single, non-hidden path component.
pub fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

/// `GET /download/{filename}` — stream an artifact as an attachment.
#[instrument(skip(state))]
pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> std::result::Result<Response, ApiError> {
    if !is_plain_file_name(&filename) {
        return Err(SprachwerkError::ArtifactNotFound(filename).into());
    }

    let path = state.config.output_dir.join(&filename);
    let file = match tokio::fs::File::open(&path).await {
        Ok(file) => file,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Err(SprachwerkError::ArtifactNotFound(filename).into());
        }
        Err(err) => return Err(err.into()),
    };

    let metadata = file.metadata().await?;
    if !metadata.is_file() {
        return Err(SprachwerkError::ArtifactNotFound(filename).into());
    }

    let content_type = mime_guess::from_path(&path).first_or_octet_stream();
    debug!(size = metadata.len(), %content_type, "Serving artifact");

    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
        (header::CONTENT_LENGTH, metadata.len().to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}
