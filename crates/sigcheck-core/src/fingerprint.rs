//! Issuer fingerprint extraction from a packet listing.

use regex::Regex;
use std::sync::OnceLock;

/// Marker present on the listing line that carries a v4 issuer fingerprint.
pub const ISSUER_FPR_MARKER: &str = "issuer fpr v4";

fn fpr_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-F0-9]{40}").expect("static regex"))
}

/// Returns the uppercased 40-hex-digit fingerprint from the first listing line
/// containing [`ISSUER_FPR_MARKER`] that also carries one, or `None`.
pub fn extract_issuer_fingerprint(listing: &str) -> Option<String> {
    listing
        .lines()
        .filter(|line| line.contains(ISSUER_FPR_MARKER))
        .find_map(|line| {
            let upper = line.to_ascii_uppercase();
            fpr_regex().find(&upper).map(|m| m.as_str().to_string())
        })
}

/// Normalise a declared fingerprint for comparison: trim, drop interior
/// whitespace (grouped notation like `ABCD EF01 ...`) and uppercase.
pub fn normalize_fingerprint(s: &str) -> String {
    s.split_whitespace()
        .collect::<String>()
        .to_ascii_uppercase()
}
