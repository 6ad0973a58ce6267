// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line and environment configuration for the server binary.
//
// Precedence, lowest to highest: built-in defaults, the JSON config file,
// then flags / `SPRACHWERK_*` environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use sprachwerk_core::error::{Result, SprachwerkError};
use sprachwerk_core::{ProviderKind, ServiceConfig};

#[derive(Debug, Clone, Parser)]
#[command(name = "sprachwerk", version, about = "Document translation service")]
pub struct Args {
    /// Address to bind to.
    #[arg(long, env = "SPRACHWERK_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, env = "SPRACHWERK_PORT", default_value_t = 5000)]
    pub port: u16,

    /// JSON configuration file. Defaults apply when omitted.
    #[arg(short = 'f', long, env = "SPRACHWERK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory where uploads are staged.
    #[arg(long, env = "SPRACHWERK_UPLOAD_DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Directory where generated documents are written.
    #[arg(long, env = "SPRACHWERK_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Translation backend.
    #[arg(long, env = "SPRACHWERK_PROVIDER", value_enum)]
    pub provider: Option<ProviderArg>,

    /// Keep staged uploads after processing.
    #[arg(long, env = "SPRACHWERK_KEEP_UPLOADS")]
    pub keep_uploads: bool,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderArg {
    Google,
    Disabled,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Google => ProviderKind::Google,
            ProviderArg::Disabled => ProviderKind::Disabled,
        }
    }
}

impl Args {
    /// Socket address to serve on.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse()
            .map_err(|err| SprachwerkError::Config(format!("invalid bind address {raw}: {err}")))
    }

    /// Resolve the effective service configuration.
    pub fn service_config(&self) -> Result<ServiceConfig> {
        let mut config = match &self.config {
            Some(path) => ServiceConfig::load(path)?,
            None => ServiceConfig::default(),
        };

        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(provider) = self.provider {
            config.translation.provider = provider.into();
        }
        if self.keep_uploads {
            config.keep_uploads = true;
        }

        config.validate()?;
        Ok(config)
    }
}
