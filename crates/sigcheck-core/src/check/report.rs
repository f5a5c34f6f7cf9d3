//! Per-component outcomes and the aggregated run report.

use std::fmt;

/// Result of checking one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentOutcome {
    Ok { expected: String, actual: String },
    Mismatch { expected: String, actual: String },
    MissingSignatureUrl,
    /// Fetch or inspection failed; carries the error text.
    Error { message: String },
}

impl ComponentOutcome {
    /// Compare an extracted fingerprint against the declared one. Both are
    /// expected to be uppercase already. An empty expectation never matches.
    pub fn compare(expected: &str, actual: &str) -> Self {
        let expected = expected.to_string();
        let actual = actual.to_string();
        if !expected.is_empty() && expected == actual {
            Self::Ok { expected, actual }
        } else {
            Self::Mismatch { expected, actual }
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentReport {
    pub name: String,
    pub outcome: ComponentOutcome,
}

/// Formats as the component's report line, without indentation.
impl fmt::Display for ComponentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.outcome {
            ComponentOutcome::Ok { expected, actual } => write!(
                f,
                "{}: expected={} signature={} status=OK",
                self.name, expected, actual
            ),
            ComponentOutcome::Mismatch { expected, actual } => write!(
                f,
                "{}: expected={} signature={} status=MISMATCH",
                self.name, expected, actual
            ),
            ComponentOutcome::MissingSignatureUrl => {
                write!(f, "{}: missing signature_url", self.name)
            }
            ComponentOutcome::Error { message } => {
                write!(f, "{}: error reading signature ({})", self.name, message)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelReport {
    pub name: String,
    pub components: Vec<ComponentReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckReport {
    pub channels: Vec<ChannelReport>,
}

impl CheckReport {
    /// Number of components that are not OK (mismatch, missing URL or error).
    pub fn mismatches(&self) -> usize {
        self.channels
            .iter()
            .flat_map(|c| &c.components)
            .filter(|c| !c.outcome.is_ok())
            .count()
    }

    pub fn is_success(&self) -> bool {
        self.mismatches() == 0
    }

    /// Closing line of the textual report.
    pub fn summary(&self) -> String {
        summary_line(self.mismatches())
    }
}

pub(crate) fn summary_line(mismatches: usize) -> String {
    if mismatches == 0 {
        "All runtime signature fingerprints match lock file.".to_string()
    } else {
        format!("Found {mismatches} mismatch(es).")
    }
}

/// Full textual report, identical to what a run streams to its writer.
impl fmt::Display for CheckReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in &self.channels {
            writeln!(f, "[{}]", channel.name)?;
            for component in &channel.components {
                writeln!(f, "  {component}")?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
    const B: &str = "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAB";

    fn component(name: &str, outcome: ComponentOutcome) -> ComponentReport {
        ComponentReport {
            name: name.to_string(),
            outcome,
        }
    }

    #[test]
    fn compare_equal_is_ok() {
        assert!(ComponentOutcome::compare(A, A).is_ok());
    }

    #[test]
    fn compare_one_char_off_is_mismatch() {
        assert_eq!(
            ComponentOutcome::compare(A, B),
            ComponentOutcome::Mismatch {
                expected: A.into(),
                actual: B.into()
            }
        );
    }

    #[test]
    fn compare_empty_never_ok() {
        assert!(!ComponentOutcome::compare("", "").is_ok());
        assert!(!ComponentOutcome::compare(A, "").is_ok());
    }

    #[test]
    fn component_lines() {
        assert_eq!(
            component("cli", ComponentOutcome::compare(A, A)).to_string(),
            format!("cli: expected={A} signature={A} status=OK")
        );
        assert_eq!(
            component("cli", ComponentOutcome::compare(A, "")).to_string(),
            format!("cli: expected={A} signature= status=MISMATCH")
        );
        assert_eq!(
            component("php", ComponentOutcome::MissingSignatureUrl).to_string(),
            "php: missing signature_url"
        );
        assert_eq!(
            component(
                "nginx",
                ComponentOutcome::Error {
                    message: "HTTP 404".into()
                }
            )
            .to_string(),
            "nginx: error reading signature (HTTP 404)"
        );
    }

    #[test]
    fn mismatches_count_every_non_ok_outcome() {
        let report = CheckReport {
            channels: vec![
                ChannelReport {
                    name: "stable".into(),
                    components: vec![
                        component("a", ComponentOutcome::compare(A, A)),
                        component("b", ComponentOutcome::compare(A, B)),
                        component("c", ComponentOutcome::MissingSignatureUrl),
                    ],
                },
                ChannelReport {
                    name: "beta".into(),
                    components: vec![component(
                        "d",
                        ComponentOutcome::Error {
                            message: "boom".into(),
                        },
                    )],
                },
            ],
        };
        assert_eq!(report.mismatches(), 3);
        assert!(!report.is_success());
        assert_eq!(report.summary(), "Found 3 mismatch(es).");
    }

    #[test]
    fn empty_report_text() {
        let report = CheckReport::default();
        assert!(report.is_success());
        assert_eq!(
            report.to_string(),
            "\nAll runtime signature fingerprints match lock file.\n"
        );
    }
}
