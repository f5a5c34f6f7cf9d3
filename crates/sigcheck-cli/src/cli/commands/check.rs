//! Check every component of the lock file and print the report.

use std::io;

use anyhow::{Context, Result};
use sigcheck_core::check::{Checker, SignatureExtractor};
use sigcheck_core::config::SigcheckConfig;
use sigcheck_core::fetch::Fetcher;
use sigcheck_core::inspect::build_inspector;
use sigcheck_core::lock::LockDocument;

/// Runs the check with `cfg`, printing the report to stdout.
/// Returns true if there were no mismatches.
pub fn run_check(cfg: &SigcheckConfig) -> Result<bool> {
    let lock = LockDocument::load(&cfg.lock_path)
        .with_context(|| format!("load lock file {}", cfg.lock_path.display()))?;
    tracing::info!(
        path = %cfg.lock_path.display(),
        channels = lock.channels.len(),
        components = lock.component_count(),
        inspector = %cfg.inspector,
        "checking signature fingerprints"
    );

    let inspector = build_inspector(cfg.inspector, cfg.gpg_program.clone());
    let extractor = SignatureExtractor::new(Fetcher::new(cfg.fetch.to_options()), inspector);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = Checker::new(&extractor)
        .run(&lock, &mut out)
        .context("write report")?;
    Ok(report.is_success())
}
