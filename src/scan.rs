//! One-shot refresh cycle
//!
//! All state a scan needs travels in an explicit [`ScanContext`]; nothing is
//! held process-wide. A refresh runs to completion once started.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;
use crate::error::ScanError;
use crate::forest::{apply_change_overlay, build_forest_with};
use crate::git::worktree::{annotate, list_worktrees, AnnotateContext};
use crate::git::StatusProbe;
use crate::liveness::LivenessTracker;
use crate::models::server::ServerEntry;
use crate::models::worktree::{WorktreeNode, WorktreeRecord};
use crate::process::ProcessProbe;

/// Inputs for one scan.
#[derive(Debug, Clone)]
pub struct ScanContext {
    /// Directory git is run from
    pub repo_dir: PathBuf,
    /// Working directory for the "current worktree" marker; when unset it is
    /// read from the process at scan time
    pub cwd: Option<PathBuf>,
    /// Root worktree override; defaults to the first listed worktree
    pub root_path: Option<PathBuf>,
    pub config: Config,
}

impl ScanContext {
    pub fn new(repo_dir: impl Into<PathBuf>, config: Config) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            cwd: None,
            root_path: None,
            config,
        }
    }

    pub fn with_root(mut self, root_path: Option<PathBuf>) -> Self {
        self.root_path = root_path;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Tracker over `<repo_dir>/<mcp_dir>/pids`
    pub fn liveness_tracker(&self) -> LivenessTracker {
        LivenessTracker::new(self.config.pids_dir(&self.repo_dir))
    }
}

/// Flat, annotated listing plus the root it was annotated against
#[derive(Debug, Clone)]
pub struct Topology {
    pub root_path: PathBuf,
    pub records: Vec<WorktreeRecord>,
}

/// List, parse and annotate the worktrees visible from `ctx.repo_dir`.
pub fn read_topology(ctx: &ScanContext) -> Result<Topology, ScanError> {
    let entries = list_worktrees(&ctx.repo_dir, ctx.config.command_timeout())?;

    // git always lists the main worktree first
    let root_path = ctx
        .root_path
        .clone()
        .or_else(|| entries.first().map(|entry| entry.path.clone()))
        .unwrap_or_else(|| ctx.repo_dir.clone());

    let cwd = ctx.cwd.clone().or_else(|| env::current_dir().ok());
    let annotate_ctx = AnnotateContext {
        root_path: &root_path,
        cwd: cwd.as_deref(),
        context_dir: &ctx.config.context_dir,
    };
    let records = annotate(entries, &annotate_ctx);
    debug!(count = records.len(), root = %root_path.display(), "read worktree topology");

    Ok(Topology { root_path, records })
}

/// List worktrees and assemble them into a forest, without the change overlay.
pub fn scan_forest(ctx: &ScanContext) -> Result<(PathBuf, Vec<WorktreeNode>), ScanError> {
    let Topology { root_path, records } = read_topology(ctx)?;
    let forest = build_forest_with(records, &root_path, &ctx.config.worktrees_dir);
    Ok((root_path, forest))
}

/// Everything a renderer needs for one refresh.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub scanned_at: DateTime<Utc>,
    pub root_path: Option<PathBuf>,
    pub forest: Vec<WorktreeNode>,
    pub servers: Vec<ServerEntry>,
    /// Set when the listing failed; the forest is then empty
    pub listing_error: Option<ScanError>,
}

impl Snapshot {
    pub fn worktree_count(&self) -> usize {
        self.forest.iter().map(WorktreeNode::subtree_len).sum()
    }

    pub fn root_path(&self) -> Option<&Path> {
        self.root_path.as_deref()
    }
}

/// Run one refresh cycle.
///
/// A listing failure empties the forest and is reported once in
/// `listing_error`; server statuses are still evaluated. Pass `None` for
/// `status_probe` to skip the uncommitted-changes overlay.
pub fn refresh<P: ProcessProbe>(
    ctx: &ScanContext,
    status_probe: Option<&dyn StatusProbe>,
    tracker: &LivenessTracker<P>,
) -> Snapshot {
    let (root_path, forest, listing_error) = match scan_forest(ctx) {
        Ok((root_path, mut forest)) => {
            if let Some(probe) = status_probe {
                apply_change_overlay(&mut forest, probe);
            }
            (Some(root_path), forest, None)
        }
        Err(e) => (None, Vec::new(), Some(e)),
    };

    Snapshot {
        scanned_at: Utc::now(),
        root_path,
        forest,
        servers: server_entries(&ctx.config, tracker),
        listing_error,
    }
}

/// Status of every configured server, in name order.
pub fn server_entries<P: ProcessProbe>(
    config: &Config,
    tracker: &LivenessTracker<P>,
) -> Vec<ServerEntry> {
    let statuses = tracker.status(config.server_names());
    config
        .servers
        .iter()
        .filter_map(|(name, description)| {
            statuses.get(name).map(|status| ServerEntry {
                name: name.clone(),
                description: description.clone(),
                status: *status,
            })
        })
        .collect()
}
