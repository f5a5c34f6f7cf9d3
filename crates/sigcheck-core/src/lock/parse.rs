//! Raw JSON shape of a lock file, before normalisation.

use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level lock file. Only `channels` is read; other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RawLock {
    #[serde(default)]
    pub channels: Option<Map<String, Value>>,
}

/// A component record as written in the file.
#[derive(Debug, Deserialize)]
pub struct RawComponent {
    #[serde(default)]
    pub signature_url: Option<String>,
    #[serde(default)]
    pub public_key_fingerprint: Option<String>,
}
