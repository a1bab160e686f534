//! Error taxonomy for topology scans and liveness checks
//!
//! Malformed listing lines and failed pid-file cleanup are deliberately not
//! represented here: both are skipped and logged, never surfaced.

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

/// Failures surfaced by a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScanError {
    /// The worktree listing command failed, timed out, or is missing.
    /// Batch-fatal: the scan yields an empty forest.
    #[error("worktree listing unavailable: {diagnostic}")]
    ListingUnavailable { diagnostic: String },

    /// A per-worktree or per-server side probe failed. Only that unit degrades.
    #[error("probe failed for {}: {reason}", target.display())]
    ProbeFailed { target: PathBuf, reason: String },
}

/// Failures of a single external command invocation.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {command}: {source}")]
    Wait {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} timed out after {}s", timeout.as_secs())]
    TimedOut { command: String, timeout: Duration },
}
