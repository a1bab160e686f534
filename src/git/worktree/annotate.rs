//! Derived worktree fields
//!
//! Runs as a second pass over the full parsed listing so that comparisons
//! against the root worktree do not depend on listing order.

use glob::Pattern;
use std::path::Path;
use tracing::debug;

use super::parser::PorcelainEntry;
use crate::models::worktree::WorktreeRecord;

/// Display name given to the root worktree
pub const ROOT_DISPLAY_NAME: &str = "main";

const TASK_FILE_PREFIX: &str = "issue-";
const TASK_FILE_SUFFIX: &str = ".md";

/// Inputs the derived fields are computed against
#[derive(Debug, Clone, Copy)]
pub struct AnnotateContext<'a> {
    pub root_path: &'a Path,
    /// Process working directory at scan time, if it could be determined
    pub cwd: Option<&'a Path>,
    /// Name of the sidecar directory inside each worktree
    pub context_dir: &'a str,
}

/// Turn raw porcelain entries into full records.
pub fn annotate(entries: Vec<PorcelainEntry>, ctx: &AnnotateContext<'_>) -> Vec<WorktreeRecord> {
    entries
        .into_iter()
        .map(|entry| annotate_entry(entry, ctx))
        .collect()
}

fn annotate_entry(entry: PorcelainEntry, ctx: &AnnotateContext<'_>) -> WorktreeRecord {
    let display_name = if same_path(&entry.path, ctx.root_path) {
        ROOT_DISPLAY_NAME.to_string()
    } else {
        entry
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| entry.path.display().to_string())
    };

    let is_current = ctx.cwd.is_some_and(|cwd| same_path(&entry.path, cwd));

    let context_path = entry.path.join(ctx.context_dir);
    let has_sidecar_context = context_path.is_dir();
    let associated_task_id = if has_sidecar_context {
        find_task_id(&context_path)
    } else {
        None
    };

    WorktreeRecord {
        is_detached: entry.detached || (entry.branch.is_none() && !entry.bare),
        path: entry.path,
        head_commit: entry.head,
        branch_name: entry.branch,
        is_bare: entry.bare,
        locked: entry.locked,
        prunable: entry.prunable,
        display_name,
        is_current,
        associated_task_id,
        has_sidecar_context,
    }
}

/// Id from the lexically first `issue-<id>.md` in `context_path`.
pub fn find_task_id(context_path: &Path) -> Option<String> {
    let pattern = format!(
        "{}/{TASK_FILE_PREFIX}*{TASK_FILE_SUFFIX}",
        Pattern::escape(&context_path.to_string_lossy())
    );

    let paths = match glob::glob(&pattern) {
        Ok(paths) => paths,
        Err(e) => {
            debug!(path = %context_path.display(), error = %e, "invalid sidecar glob pattern");
            return None;
        }
    };

    paths
        .flatten()
        .filter_map(|path| {
            let name = path.file_name()?.to_str()?.to_string();
            let id = name
                .strip_prefix(TASK_FILE_PREFIX)?
                .strip_suffix(TASK_FILE_SUFFIX)?;
            (!id.is_empty()).then(|| (name.clone(), id.to_string()))
        })
        .min()
        .map(|(_, id)| id)
}

/// Path equality that sees through symlinks when both sides resolve.
pub(crate) fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
