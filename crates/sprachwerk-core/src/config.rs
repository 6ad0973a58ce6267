// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service configuration.
//
// Configuration is read once at startup and handed to the request handler as
// read-only state; nothing here is mutated while requests are in flight.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SprachwerkError};

/// Upload ceiling enforced at the HTTP boundary (50 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Persistent service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Directory where uploads are staged before extraction.
    pub upload_dir: PathBuf,
    /// Directory where generated artifacts are written and served from.
    pub output_dir: PathBuf,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Keep staged uploads on disk after processing (useful for inspection).
    pub keep_uploads: bool,
    /// Translation provider settings.
    pub translation: TranslationConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("uploads"),
            output_dir: PathBuf::from("outputs"),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            keep_uploads: false,
            translation: TranslationConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load settings from a JSON file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            SprachwerkError::Config(format!("cannot read {}: {}", path.display(), err))
        })?;
        let config: ServiceConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.max_upload_bytes == 0 {
            return Err(SprachwerkError::Config(
                "max_upload_bytes must be greater than zero".into(),
            ));
        }
        if self.translation.max_chunk_chars == 0 {
            return Err(SprachwerkError::Config(
                "translation.max_chunk_chars must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Create the staging and output directories if they do not exist.
    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.upload_dir)?;
        std::fs::create_dir_all(&self.output_dir)?;
        Ok(())
    }
}

/// Which translation backend to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Translate's public `translate_a/single` endpoint.
    Google,
    /// No provider; every document passes through untranslated.
    Disabled,
}

/// Translation provider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    pub provider: ProviderKind,
    /// Base URL of the provider (no trailing path).
    pub endpoint: String,
    /// Per-request timeout for the provider call.
    pub timeout_secs: u64,
    /// Largest chunk of text sent in a single provider request.
    pub max_chunk_chars: usize,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Google,
            endpoint: "https://translate.googleapis.com".to_string(),
            timeout_secs: 30,
            max_chunk_chars: 5000,
        }
    }
}
