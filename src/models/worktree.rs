use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// A single worktree reported by `git worktree list --porcelain`, with the
/// fields derived from the local filesystem filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeRecord {
    /// Absolute path to the worktree directory. Never empty.
    pub path: PathBuf,
    /// Commit the worktree's HEAD points at, if resolvable
    pub head_commit: Option<String>,
    /// Branch name with `refs/heads/` stripped; `None` when detached
    pub branch_name: Option<String>,
    pub is_detached: bool,
    /// True for the repository's bare entry (no working tree)
    pub is_bare: bool,
    /// `Some(reason)` when the worktree is locked; reason may be empty
    pub locked: Option<String>,
    /// `Some(reason)` when git considers the worktree prunable
    pub prunable: Option<String>,
    /// Last path component, or `main` for the root worktree
    pub display_name: String,
    /// True iff this is the process working directory at scan time
    pub is_current: bool,
    /// `<id>` from the first `.context/issue-<id>.md` found
    pub associated_task_id: Option<String>,
    /// True iff the `.context` sidecar directory exists
    pub has_sidecar_context: bool,
}

impl WorktreeRecord {
    /// Label used when rendering: the branch, or `detached` when none is attached.
    pub fn branch_label(&self) -> &str {
        match &self.branch_name {
            Some(branch) => branch,
            None => "detached",
        }
    }
}

/// Outcome of the per-worktree "uncommitted changes" probe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeStatus {
    Clean,
    Dirty,
    /// Not probed yet, or the probe failed
    #[default]
    Unknown,
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeStatus::Clean => write!(f, "clean"),
            ChangeStatus::Dirty => write!(f, "dirty"),
            ChangeStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// A forest element. Nodes own their children; there is no parent link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeNode {
    #[serde(flatten)]
    pub record: WorktreeRecord,
    pub changes: ChangeStatus,
    pub children: Vec<WorktreeNode>,
}

impl WorktreeNode {
    pub fn new(record: WorktreeRecord) -> Self {
        Self {
            record,
            changes: ChangeStatus::Unknown,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Number of nodes in this subtree, including `self`
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(WorktreeNode::subtree_len).sum::<usize>()
    }
}
