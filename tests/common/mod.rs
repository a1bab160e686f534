//! Git-related test helpers

#![allow(dead_code)]

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Run git in `dir`, failing the helper on a non-zero exit.
pub fn git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .with_context(|| format!("Failed to run git {}", args.join(" ")))?;
    if !output.status.success() {
        bail!(
            "git {} failed: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Creates a temporary git repository with initial commit
///
/// Returns a TempDir that must be kept in scope for the lifetime of the test
pub fn create_temp_git_repo() -> Result<TempDir> {
    let temp = TempDir::new().context("Failed to create temp directory")?;

    git(temp.path(), &["init", "--quiet"])?;
    git(temp.path(), &["config", "user.email", "test@test.com"])?;
    git(temp.path(), &["config", "user.name", "Test User"])?;

    std::fs::write(temp.path().join("README.md"), "# Test Repository\n")
        .context("Failed to write README.md")?;
    // Nested worktrees live inside the repo; keep them out of status output
    std::fs::write(temp.path().join(".gitignore"), "worktrees/\n.mcp/\n")
        .context("Failed to write .gitignore")?;

    git(temp.path(), &["add", "."])?;
    git(temp.path(), &["commit", "--quiet", "-m", "Initial commit"])?;

    Ok(temp)
}

/// Add a worktree on a new branch at `<parent>/worktrees/<name>`.
pub fn add_nested_worktree(repo: &Path, parent: &Path, name: &str, branch: &str) -> Result<PathBuf> {
    let path = parent.join("worktrees").join(name);
    git(
        repo,
        &["worktree", "add", "--quiet", "-b", branch, &path.to_string_lossy()],
    )?;
    Ok(path)
}

pub fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
