//! `gpg --batch --list-packets` backend.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use super::{InspectError, PacketInspector};

/// Runs an OpenPGP implementation's packet listing non-interactively.
#[derive(Debug, Clone)]
pub struct GpgInspector {
    program: PathBuf,
}

impl GpgInspector {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GpgInspector {
    fn default() -> Self {
        Self::new("gpg")
    }
}

impl PacketInspector for GpgInspector {
    fn name(&self) -> &str {
        "gpg"
    }

    fn list_packets(&self, path: &Path) -> Result<String, InspectError> {
        let program = self.program.display().to_string();
        tracing::debug!(program = %program, path = %path.display(), "listing packets");
        let output = Command::new(&self.program)
            .arg("--batch")
            .arg("--list-packets")
            .arg(path)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| InspectError::Spawn {
                program: program.clone(),
                source,
            })?;

        // gpg reports some packet details on stderr; keep both streams.
        let mut listing = String::from_utf8_lossy(&output.stdout).into_owned();
        listing.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(InspectError::Exit {
                program,
                status: output.status,
                output: listing,
            });
        }
        Ok(listing)
    }
}
