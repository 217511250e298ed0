use thiserror::Error;

/// Failures surfaced while building workload resources.
///
/// Only the exposed-port declarations of a role can be malformed; claim
/// derivation and spec assembly are pure data transformations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExportError {
    #[error("Invalid name {name:?} for exposed port of role {role}: {reason}")]
    InvalidPortName {
        role: String,
        name: String,
        reason: &'static str,
    },
    #[error("Invalid range {range:?} for exposed port {name} of role {role}: {reason}")]
    InvalidPortRange {
        role: String,
        name: String,
        range: String,
        reason: &'static str,
    },
}
