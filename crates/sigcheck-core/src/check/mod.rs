//! The checker: walk a lock document, extract each component's issuer
//! fingerprint, and compare it with the declared one.
//!
//! Components are checked one after another. A failing component is recorded
//! and the walk continues, so the report always covers every declared
//! component.

mod report;

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::fetch::Fetcher;
use crate::fingerprint::extract_issuer_fingerprint;
use crate::inspect::PacketInspector;
use crate::lock::{ComponentRecord, LockDocument};

pub use report::{ChannelReport, CheckReport, ComponentOutcome, ComponentReport};

/// Something that can tell which key issued the signature at a URL.
pub trait FingerprintSource {
    /// Uppercased issuer fingerprint, or an empty string if the signature
    /// carries none.
    fn fingerprint_of(&self, signature_url: &str) -> Result<String>;
}

/// Downloads a detached signature and lists its packets to find the issuer.
pub struct SignatureExtractor<I> {
    fetcher: Fetcher,
    inspector: I,
}

impl<I: PacketInspector> SignatureExtractor<I> {
    pub fn new(fetcher: Fetcher, inspector: I) -> Self {
        Self { fetcher, inspector }
    }

    pub fn inspector(&self) -> &I {
        &self.inspector
    }
}

impl<I: PacketInspector> FingerprintSource for SignatureExtractor<I> {
    fn fingerprint_of(&self, signature_url: &str) -> Result<String> {
        // Dropping `sig` removes the temp file on every path out of here.
        let sig = self.fetcher.fetch_to_temp(signature_url)?;
        let listing = self
            .inspector
            .list_packets(sig.path())
            .with_context(|| format!("{} --list-packets", self.inspector.name()))?;
        Ok(extract_issuer_fingerprint(&listing).unwrap_or_default())
    }
}

/// Runs the fingerprint check over a lock document.
pub struct Checker<'a> {
    source: &'a dyn FingerprintSource,
}

impl<'a> Checker<'a> {
    pub fn new(source: &'a dyn FingerprintSource) -> Self {
        Self { source }
    }

    /// Check one component. Never fails: errors become [`ComponentOutcome::Error`].
    pub fn check_component(&self, record: &ComponentRecord) -> ComponentOutcome {
        if record.signature_url.trim().is_empty() {
            return ComponentOutcome::MissingSignatureUrl;
        }
        match self.source.fingerprint_of(&record.signature_url) {
            Ok(actual) => ComponentOutcome::compare(
                &record.public_key_fingerprint,
                &actual.to_ascii_uppercase(),
            ),
            Err(e) => ComponentOutcome::Error {
                message: format!("{e:#}"),
            },
        }
    }

    /// Check every component, streaming report lines to `out` as they are
    /// produced, and return the collected report.
    ///
    /// Only writing to `out` can fail.
    pub fn run<W: Write>(&self, lock: &LockDocument, out: &mut W) -> io::Result<CheckReport> {
        let mut report = CheckReport::default();
        for channel in &lock.channels {
            writeln!(out, "[{}]", channel.name)?;
            let mut components = Vec::with_capacity(channel.components.len());
            for (name, record) in &channel.components {
                tracing::debug!(
                    channel = %channel.name,
                    component = %name,
                    url = %record.signature_url,
                    "checking component"
                );
                let component = ComponentReport {
                    name: name.clone(),
                    outcome: self.check_component(record),
                };
                match &component.outcome {
                    ComponentOutcome::Ok { .. } => {}
                    ComponentOutcome::Error { message } => {
                        tracing::warn!(
                            channel = %channel.name,
                            component = %name,
                            error = %message,
                            "signature unreadable"
                        );
                    }
                    other => {
                        tracing::warn!(
                            channel = %channel.name,
                            component = %name,
                            outcome = ?other,
                            "fingerprint check failed"
                        );
                    }
                }
                writeln!(out, "  {component}")?;
                components.push(component);
            }
            report.channels.push(ChannelReport {
                name: channel.name.clone(),
                components,
            });
        }

        let mismatches = report.mismatches();
        writeln!(out)?;
        writeln!(out, "{}", report::summary_line(mismatches))?;
        out.flush()?;
        tracing::info!(
            channels = report.channels.len(),
            components = lock.component_count(),
            mismatches,
            "fingerprint check finished"
        );
        Ok(report)
    }
}
