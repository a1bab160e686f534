//! Working-tree dirtiness probe

use std::path::Path;
use std::time::Duration;

use crate::error::ScanError;
use crate::git::runner::{diagnostic, run_git, DEFAULT_GIT_TIMEOUT};

/// Answers "does this worktree have uncommitted changes?".
///
/// Implementations must be callable from several threads at once; each call
/// touches only the worktree it is given.
pub trait StatusProbe: Sync {
    fn has_changes(&self, worktree: &Path) -> Result<bool, ScanError>;
}

/// Probe backed by `git status --porcelain`. Any output at all, untracked
/// files included, counts as dirty.
#[derive(Debug, Clone, Copy)]
pub struct GitStatusProbe {
    timeout: Duration,
}

impl GitStatusProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for GitStatusProbe {
    fn default() -> Self {
        Self::new(DEFAULT_GIT_TIMEOUT)
    }
}

impl StatusProbe for GitStatusProbe {
    fn has_changes(&self, worktree: &Path) -> Result<bool, ScanError> {
        let probe_failed = |reason: String| ScanError::ProbeFailed {
            target: worktree.to_path_buf(),
            reason,
        };

        let output = run_git(&["status", "--porcelain"], worktree, self.timeout)
            .map_err(|e| probe_failed(e.to_string()))?;

        if !output.status.success() {
            return Err(probe_failed(diagnostic(&output)));
        }

        Ok(!output.stdout.iter().all(u8::is_ascii_whitespace))
    }
}
