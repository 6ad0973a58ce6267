// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// HTTP error mapping — every failure leaves the service as `{"error": ...}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use sprachwerk_core::{ErrorClass, SprachwerkError};

/// A pipeline error on its way out as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub SprachwerkError);

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self.0.class() {
            ErrorClass::ClientInput => StatusCode::BAD_REQUEST,
            ErrorClass::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            ErrorClass::NotFound => StatusCode::NOT_FOUND,
            ErrorClass::Processing => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message placed in the `error` field of the response body.
    pub fn user_message(&self) -> String {
        match self.0.class() {
            ErrorClass::Processing => format!("Processing failed: {}", self.0),
            _ => self.0.to_string(),
        }
    }
}

impl From<SprachwerkError> for ApiError {
    fn from(err: SprachwerkError) -> Self {
        Self(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self(SprachwerkError::Io(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self.0.class() {
            ErrorClass::Processing => tracing::error!("Processing error: {:#}", self.0),
            ErrorClass::PayloadTooLarge => tracing::warn!("Rejected upload: {}", self.0),
            ErrorClass::ClientInput | ErrorClass::NotFound => {
                tracing::debug!("Client error: {}", self.0)
            }
        }

        let status = self.status_code();
        (status, Json(json!({ "error": self.user_message() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_keep_their_message() {
        let err = ApiError(SprachwerkError::MissingFilePart);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.user_message(), "No file part in the request");

        let err = ApiError(SprachwerkError::InvalidOutputFormat("odt".into()));
        assert_eq!(err.user_message(), "Invalid output format");
    }

    #[test]
    fn processing_errors_are_prefixed() {
        let err = ApiError(SprachwerkError::Pdf("bad xref".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.user_message(),
            "Processing failed: PDF operation failed: bad xref"
        );
    }

    #[test]
    fn size_and_lookup_errors_have_dedicated_statuses() {
        let too_large = ApiError(SprachwerkError::UploadTooLarge { limit: 10 });
        assert_eq!(too_large.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

        let missing = ApiError(SprachwerkError::ArtifactNotFound("x.txt".into()));
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
    }
}
