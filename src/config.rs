//! devflow configuration
//!
//! Read from `<repo>/.devflow.toml`, falling back to
//! `<config_dir>/devflow/config.toml`. The first file found wins; every key is
//! optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::forest::NESTED_WORKTREES_DIR;

pub const REPO_CONFIG_FILE: &str = ".devflow.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sidecar directory holding `issue-<id>.md` files
    pub context_dir: String,
    /// Directory name under which nested worktrees live
    pub worktrees_dir: String,
    /// Directory holding `pids/<server>.pid`, relative to the repo root
    pub mcp_dir: PathBuf,
    /// Upper bound on any single git invocation
    pub command_timeout_secs: u64,
    /// Server name -> human readable description
    pub servers: BTreeMap<String, String>,
    pub commands: CommandsConfig,
}

/// Pass-through commands run inside the development shell
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CommandsConfig {
    /// Wrapper prefix; the command string is appended as the final argument
    pub shell: Vec<String>,
    pub create: String,
    pub mcp_start: String,
    pub mcp_stop: String,
}

impl Default for Config {
    fn default() -> Self {
        let servers = [
            ("context7", "Context7 (Documentation)"),
            ("playwright", "Playwright (Browser)"),
            ("python", "Python Sandbox"),
            ("sequential", "Sequential Thinking"),
            ("zen", "Zen Multi-Model"),
        ]
        .into_iter()
        .map(|(name, desc)| (name.to_string(), desc.to_string()))
        .collect();

        Self {
            context_dir: ".context".to_string(),
            worktrees_dir: NESTED_WORKTREES_DIR.to_string(),
            mcp_dir: PathBuf::from(".mcp"),
            command_timeout_secs: 10,
            servers,
            commands: CommandsConfig::default(),
        }
    }
}

impl Default for CommandsConfig {
    fn default() -> Self {
        Self {
            shell: ["devenv", "shell", "--impure", "-c"]
                .into_iter()
                .map(String::from)
                .collect(),
            create: "wt-new".to_string(),
            mcp_start: "mcp-start".to_string(),
            mcp_stop: "mcp-stop".to_string(),
        }
    }
}

impl Config {
    /// Load configuration for the repository at `repo_root`.
    pub fn load(repo_root: &Path) -> Result<Self> {
        for path in config_paths(repo_root) {
            if path.is_file() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(raw)?;
        if config.command_timeout_secs == 0 {
            config.command_timeout_secs = Self::default().command_timeout_secs;
        }
        Ok(config)
    }

    pub fn command_timeout(&self) -> Duration {
        Duration::from_secs(self.command_timeout_secs)
    }

    /// Pid directory resolved against the repository root
    pub fn pids_dir(&self, repo_root: &Path) -> PathBuf {
        crate::liveness::pids_dir(&repo_root.join(&self.mcp_dir))
    }

    pub fn server_names(&self) -> impl Iterator<Item = &str> {
        self.servers.keys().map(String::as_str)
    }
}

fn config_paths(repo_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![repo_root.join(REPO_CONFIG_FILE)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("devflow").join("config.toml"));
    }
    paths
}
