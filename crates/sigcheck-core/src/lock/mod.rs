//! Lock document: channels of components, each declaring where its detached
//! signature lives and which signing-key fingerprint is expected.
//!
//! Channels keep the order they have in the file. Components are held in a
//! `BTreeMap`, so they always iterate in lexicographic order by name.

mod parse;

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::fingerprint::normalize_fingerprint;

use parse::{RawComponent, RawLock};

/// Errors loading a lock document. These are fatal for a run.
#[derive(Debug, Error)]
pub enum LockError {
    #[error("read lock file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse lock file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("parse lock file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("channel {channel:?} is not an object")]
    ChannelNotObject { channel: String },
    #[error("component {channel}/{component} is not an object")]
    ComponentNotObject { channel: String, component: String },
    #[error("component {channel}/{component}: {source}")]
    Component {
        channel: String,
        component: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Declared signature location and expected key for one component.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ComponentRecord {
    /// URL of the detached signature, trimmed. Empty when not declared.
    pub signature_url: String,
    /// Expected issuer fingerprint, normalised to uppercase hex.
    pub public_key_fingerprint: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub name: String,
    pub components: BTreeMap<String, ComponentRecord>,
}

/// Parsed lock file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LockDocument {
    pub channels: Vec<Channel>,
}

impl LockDocument {
    /// Read and parse the lock file at `path`.
    pub fn load(path: &Path) -> Result<Self, LockError> {
        let data = std::fs::read_to_string(path).map_err(|source| LockError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data).map_err(|e| match e {
            LockError::Json(source) => LockError::Parse {
                path: path.display().to_string(),
                source,
            },
            other => other,
        })
    }

    pub fn from_json_str(data: &str) -> Result<Self, LockError> {
        let raw: RawLock = serde_json::from_str(data)?;
        let mut channels = Vec::new();
        for (name, value) in raw.channels.unwrap_or_default() {
            let Value::Object(entries) = value else {
                return Err(LockError::ChannelNotObject { channel: name });
            };
            let mut components = BTreeMap::new();
            for (component, value) in entries {
                if !value.is_object() {
                    return Err(LockError::ComponentNotObject {
                        channel: name,
                        component,
                    });
                }
                let record: RawComponent =
                    serde_json::from_value(value).map_err(|source| LockError::Component {
                        channel: name.clone(),
                        component: component.clone(),
                        source,
                    })?;
                components.insert(component, ComponentRecord::from(record));
            }
            channels.push(Channel { name, components });
        }
        Ok(Self { channels })
    }

    /// Total number of components across all channels.
    pub fn component_count(&self) -> usize {
        self.channels.iter().map(|c| c.components.len()).sum()
    }
}

impl From<RawComponent> for ComponentRecord {
    fn from(raw: RawComponent) -> Self {
        Self {
            signature_url: raw.signature_url.unwrap_or_default().trim().to_string(),
            public_key_fingerprint: normalize_fingerprint(
                raw.public_key_fingerprint.as_deref().unwrap_or_default(),
            ),
        }
    }
}
