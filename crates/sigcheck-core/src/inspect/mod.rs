//! Packet inspection: turn a signature file into a textual packet listing.
//!
//! The listing follows the `gpg --list-packets` layout so the issuer
//! fingerprint can be found the same way whichever backend produced it.

mod gpg;
mod native;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use gpg::GpgInspector;
pub use native::{list_packets_bytes, NativeInspector};

#[derive(Debug, Error)]
pub enum InspectError {
    #[error("read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{program} exited with {status}{}", summarize(.output))]
    Exit {
        program: String,
        status: ExitStatus,
        /// Everything the tool printed (stdout, then stderr).
        output: String,
    },
    #[error("malformed OpenPGP data: {0}")]
    Malformed(String),
}

/// Last non-empty line of tool output, for one-line error messages.
fn summarize(output: &str) -> String {
    output
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .last()
        .map(|l| format!(" ({l})"))
        .unwrap_or_default()
}

/// Produces a packet listing for an OpenPGP file on disk.
pub trait PacketInspector {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    fn list_packets(&self, path: &Path) -> Result<String, InspectError>;
}

impl<T: PacketInspector + ?Sized> PacketInspector for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn list_packets(&self, path: &Path) -> Result<String, InspectError> {
        (**self).list_packets(path)
    }
}

/// Which packet inspection backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectorKind {
    /// External `gpg --batch --list-packets`.
    #[default]
    Gpg,
    /// Built-in packet parser; no external tool needed.
    Native,
}

impl FromStr for InspectorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpg" => Ok(Self::Gpg),
            "native" => Ok(Self::Native),
            other => Err(format!("unknown inspector {other:?} (expected gpg or native)")),
        }
    }
}

impl fmt::Display for InspectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpg => f.write_str("gpg"),
            Self::Native => f.write_str("native"),
        }
    }
}

/// Build the inspector selected by `kind`. `gpg_program` is only used by the gpg backend.
pub fn build_inspector(kind: InspectorKind, gpg_program: PathBuf) -> Box<dyn PacketInspector> {
    match kind {
        InspectorKind::Gpg => Box::new(GpgInspector::new(gpg_program)),
        InspectorKind::Native => Box::new(NativeInspector),
    }
}
