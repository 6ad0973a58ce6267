// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sprachwerk Server — the HTTP face of the translation pipeline.
//
// Routes:
//   GET  /                     upload form
//   POST /process              multipart upload → translated artifact
//   GET  /download/{filename}  stream a generated artifact
//   GET  /health               liveness probe

pub mod config;
pub mod error;
pub mod handlers;
pub mod pipeline;
pub mod staging;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use sprachwerk_core::ServiceConfig;
use sprachwerk_translate::Translator;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Multipart framing (boundaries, part headers, form fields) on top of the
/// file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Read-only state shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub translator: Arc<Translator>,
}

impl AppState {
    pub fn new(config: ServiceConfig, translator: Translator) -> Self {
        Self {
            config: Arc::new(config),
            translator: Arc::new(translator),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/process",
            post(handlers::process).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/download/{filename}", get(handlers::download))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
