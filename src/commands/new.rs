use anyhow::Result;

use super::passthrough;
use crate::scan::ScanContext;

/// Create a worktree for `branch` via the configured create command.
///
/// With `parent`, the new worktree is nested under that worktree.
pub fn execute(ctx: &ScanContext, branch: &str, parent: Option<&str>) -> Result<()> {
    let mut args = vec![branch];
    args.extend(parent);
    passthrough::run(
        &ctx.config.commands,
        &ctx.repo_dir,
        &ctx.config.commands.create,
        &args,
    )
}
