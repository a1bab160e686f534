//! Run configured commands inside the development shell
//!
//! devflow does not create worktrees or start servers itself; it hands the
//! configured command to the shell wrapper (`devenv shell --impure -c` by
//! default) with inherited stdio.

use anyhow::{anyhow, bail, Context, Result};
use shell_escape::escape;
use std::borrow::Cow;
use std::path::Path;
use std::process::Command;
use tracing::info;

use crate::config::CommandsConfig;

/// Join `command` and its shell-escaped arguments into one script string.
pub fn build_script(command: &str, args: &[&str]) -> String {
    let mut script = command.to_string();
    for arg in args {
        script.push(' ');
        script.push_str(&escape(Cow::Borrowed(*arg)));
    }
    script
}

/// Fail early with a readable message when the wrapper program is missing.
pub fn check_shell_available(commands: &CommandsConfig) -> Result<()> {
    let program = commands
        .shell
        .first()
        .ok_or_else(|| anyhow!("No shell wrapper configured under [commands].shell"))?;
    if which::which(program).is_err() {
        bail!(
            "{program} is not installed or not on PATH.\n\
             Configure a different wrapper with [commands].shell in .devflow.toml"
        );
    }
    Ok(())
}

/// Run `command args..` through the configured wrapper from `repo_dir`.
pub fn run(commands: &CommandsConfig, repo_dir: &Path, command: &str, args: &[&str]) -> Result<()> {
    check_shell_available(commands)?;

    let script = build_script(command, args);
    let (program, wrapper_args) = commands
        .shell
        .split_first()
        .ok_or_else(|| anyhow!("No shell wrapper configured under [commands].shell"))?;
    info!(%program, %script, "running pass-through command");

    let status = Command::new(program)
        .args(wrapper_args)
        .arg(&script)
        .current_dir(repo_dir)
        .status()
        .with_context(|| format!("Failed to execute {program}"))?;

    if !status.success() {
        bail!("`{script}` failed with {status}");
    }
    Ok(())
}
