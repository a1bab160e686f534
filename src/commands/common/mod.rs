//! Shared setup for commands: repository discovery and scan context.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::git::run_git;
use crate::scan::ScanContext;

/// Resolve the repository working directory.
///
/// Uses `git rev-parse --show-toplevel` from `start` (or the current
/// directory). Outside a repository the start directory is returned as-is so
/// the scan itself can report the listing failure.
pub fn resolve_repo_dir(start: Option<&Path>, config: &Config) -> Result<PathBuf> {
    let start = match start {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    match run_git(
        &["rev-parse", "--show-toplevel"],
        &start,
        config.command_timeout(),
    ) {
        Ok(output) if output.status.success() => {
            let top = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if top.is_empty() {
                Ok(start)
            } else {
                Ok(PathBuf::from(top))
            }
        }
        Ok(_) | Err(_) => {
            debug!(dir = %start.display(), "not inside a git work tree");
            Ok(start)
        }
    }
}

/// Build the scan context for a command invocation.
pub fn scan_context(repo: Option<&Path>, root: Option<PathBuf>) -> Result<ScanContext> {
    // Discovery runs before the repo config is known, so it uses the defaults
    let repo_dir = resolve_repo_dir(repo, &Config::default())?;
    let config = Config::load(&repo_dir)?;
    debug!(repo = %repo_dir.display(), "resolved repository");

    Ok(ScanContext::new(repo_dir, config).with_root(root))
}
