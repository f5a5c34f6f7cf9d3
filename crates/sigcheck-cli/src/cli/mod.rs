//! CLI for sigcheck.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sigcheck_core::config::{self, SigcheckConfig};
use sigcheck_core::inspect::InspectorKind;

use commands::run_check;

/// Verify that the key fingerprints declared in a lock file match the
/// issuers of the published detached signatures.
#[derive(Debug, Parser)]
#[command(name = "sigcheck", version)]
#[command(
    about = "Check lock file fingerprints against detached signature issuers",
    long_about = None
)]
pub struct Cli {
    /// Lock file to check (default: configs/sources/lock.json).
    #[arg(value_name = "LOCK")]
    pub lock: Option<PathBuf>,

    /// Config file to use instead of ~/.config/sigcheck/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Packet inspection backend: gpg or native.
    #[arg(long, value_name = "BACKEND")]
    pub inspector: Option<InspectorKind>,

    /// Program run by the gpg backend.
    #[arg(long, value_name = "PROGRAM")]
    pub gpg: Option<PathBuf>,

    /// Per-signature download timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl Cli {
    /// Parse arguments and run. Returns whether every fingerprint matched.
    pub fn run_from_args() -> Result<bool> {
        Cli::parse().run()
    }

    pub fn run(self) -> Result<bool> {
        let mut cfg = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_default()?,
        };
        self.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);
        run_check(&cfg)
    }

    /// Command-line flags take precedence over the config file.
    fn apply_overrides(&self, cfg: &mut SigcheckConfig) {
        if let Some(lock) = &self.lock {
            cfg.lock_path = lock.clone();
        }
        if let Some(kind) = self.inspector {
            cfg.inspector = kind;
        }
        if let Some(gpg) = &self.gpg {
            cfg.gpg_program = gpg.clone();
        }
        if let Some(secs) = self.timeout {
            cfg.fetch.timeout_secs = secs;
        }
    }
}
