//! Worktree output parsing
//!
//! Parses `git worktree list --porcelain` output into raw entries. Derived
//! fields are filled in afterwards by [`super::annotate`].

use std::path::PathBuf;
use tracing::{debug, trace};

/// One raw record from the porcelain listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PorcelainEntry {
    pub path: PathBuf,
    pub head: Option<String>,
    pub branch: Option<String>,
    pub detached: bool,
    pub bare: bool,
    pub locked: Option<String>,
    pub prunable: Option<String>,
}

/// Parse git worktree list --porcelain output
///
/// A record ends either at a blank line or at the next `worktree` line; both
/// are honoured, and the final record need not be followed by a blank line.
/// Unknown keys and malformed lines are skipped, never fatal.
///
/// Example input:
/// ```text
/// worktree /home/user/repo
/// HEAD abc123def456
/// branch refs/heads/main
///
/// worktree /home/user/repo/worktrees/feat-x
/// HEAD def789abc012
/// detached
/// ```
pub fn parse_worktree_list(output: &str) -> Vec<PorcelainEntry> {
    let mut entries = Vec::new();
    let mut current: Option<PorcelainEntry> = None;

    for raw in output.lines() {
        let line = raw.trim_end_matches('\r');

        if line.is_empty() {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            continue;
        }

        let (key, value) = match line.split_once(' ') {
            Some((key, value)) => (key, Some(value)),
            None => (line, None),
        };

        if key == "worktree" {
            if let Some(entry) = current.take() {
                entries.push(entry);
            }
            match value.filter(|path| !path.is_empty()) {
                Some(path) => {
                    current = Some(PorcelainEntry {
                        path: PathBuf::from(path),
                        ..PorcelainEntry::default()
                    });
                }
                None => debug!("skipping worktree line with empty path"),
            }
            continue;
        }

        let Some(entry) = current.as_mut() else {
            trace!(line, "skipping line outside of a worktree record");
            continue;
        };

        match (key, value) {
            ("HEAD", Some(head)) if !head.is_empty() => entry.head = Some(head.to_string()),
            ("branch", Some(branch)) if !branch.is_empty() => {
                let name = branch.strip_prefix("refs/heads/").unwrap_or(branch);
                entry.branch = Some(name.to_string());
            }
            ("detached", _) => entry.detached = true,
            ("bare", _) => entry.bare = true,
            ("locked", reason) => entry.locked = Some(reason.unwrap_or("").to_string()),
            ("prunable", reason) => entry.prunable = Some(reason.unwrap_or("").to_string()),
            _ => trace!(line, "ignoring unrecognized porcelain line"),
        }
    }

    if let Some(entry) = current {
        entries.push(entry);
    }

    entries
}
