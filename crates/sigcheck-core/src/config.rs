use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;
use crate::inspect::InspectorKind;

/// Lock file checked when no path is given on the command line.
pub const DEFAULT_LOCK_PATH: &str = "configs/sources/lock.json";

/// HTTP fetch parameters (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Total time allowed for one signature download, in seconds.
    pub timeout_secs: u64,
    /// Time allowed to establish the connection, in seconds.
    pub connect_timeout_secs: u64,
    /// Maximum number of redirects followed per download.
    pub max_redirects: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            connect_timeout_secs: 30,
            max_redirects: 10,
        }
    }
}

impl FetchConfig {
    pub fn to_options(&self) -> FetchOptions {
        FetchOptions {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            max_redirects: self.max_redirects,
        }
    }
}

/// Global configuration loaded from `~/.config/sigcheck/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigcheckConfig {
    /// Lock file used when none is passed on the command line.
    pub lock_path: PathBuf,
    /// Packet inspection backend: "gpg" (default) or "native".
    pub inspector: InspectorKind,
    /// Program invoked by the gpg backend.
    pub gpg_program: PathBuf,
    pub fetch: FetchConfig,
}

impl Default for SigcheckConfig {
    fn default() -> Self {
        Self {
            lock_path: PathBuf::from(DEFAULT_LOCK_PATH),
            inspector: InspectorKind::default(),
            gpg_program: PathBuf::from("gpg"),
            fetch: FetchConfig::default(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sigcheck")?;
    Ok(xdg_dirs.get_config_home().join("sigcheck").join("config.toml"))
}

/// Parse configuration from a TOML file.
pub fn load_from(path: &Path) -> Result<SigcheckConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))
}

/// Load configuration from the XDG config path, falling back to built-in
/// defaults when no file exists there.
pub fn load_or_default() -> Result<SigcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(SigcheckConfig::default());
    }
    load_from(&path)
}
