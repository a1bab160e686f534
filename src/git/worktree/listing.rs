//! Worktree listing boundary

use std::path::Path;
use std::process::Output;
use std::time::Duration;
use tracing::warn;

use super::parser::{parse_worktree_list, PorcelainEntry};
use crate::error::{CommandError, ScanError};
use crate::git::runner::{diagnostic, run_git};

/// Run `git worktree list --porcelain` in `repo_dir` and parse its output.
///
/// A missing `git`, a timeout, or a non-zero exit (including "not a git
/// repository") all map to [`ScanError::ListingUnavailable`] carrying the
/// captured diagnostic. Malformed output is never an error.
pub fn list_worktrees(repo_dir: &Path, timeout: Duration) -> Result<Vec<PorcelainEntry>, ScanError> {
    listing_from(run_git(
        &["worktree", "list", "--porcelain"],
        repo_dir,
        timeout,
    ))
}

fn listing_from(result: Result<Output, CommandError>) -> Result<Vec<PorcelainEntry>, ScanError> {
    let output = result.map_err(|e| {
        warn!(error = %e, "git worktree list could not run");
        ScanError::ListingUnavailable {
            diagnostic: e.to_string(),
        }
    })?;

    if !output.status.success() {
        let diagnostic = diagnostic(&output);
        warn!(%diagnostic, "git worktree list failed");
        return Err(ScanError::ListingUnavailable { diagnostic });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(parse_worktree_list(&stdout))
}
