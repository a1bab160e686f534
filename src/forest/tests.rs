//! Tests for forest construction and the change overlay.

use super::*;
use crate::error::{CommandError, ScanError};
use crate::git::worktree::{annotate, parse_worktree_list, AnnotateContext};
use crate::git::StatusProbe;
use crate::models::worktree::fixtures::record;
use crate::models::worktree::{ChangeStatus, WorktreeNode, WorktreeRecord};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use std::path::{Path, PathBuf};

fn records(paths: &[&str]) -> Vec<WorktreeRecord> {
    paths.iter().map(|p| record(p)).collect()
}

fn paths_of(forest: &[WorktreeNode]) -> Vec<PathBuf> {
    flatten(forest).iter().map(|r| r.path.clone()).collect()
}

fn root_paths(forest: &[WorktreeNode]) -> Vec<&Path> {
    forest.iter().map(|n| n.record.path.as_path()).collect()
}

/// Walks the forest asserting no path repeats along any root-to-leaf chain.
fn assert_acyclic(node: &WorktreeNode, ancestors: &mut Vec<PathBuf>) {
    assert!(
        !ancestors.contains(&node.record.path),
        "{} is its own ancestor",
        node.record.path.display()
    );
    ancestors.push(node.record.path.clone());
    for child in &node.children {
        assert_acyclic(child, ancestors);
    }
    ancestors.pop();
}

#[test]
fn test_end_to_end_listing_to_forest() {
    let listing = "worktree /repo\nHEAD abcd1234\nbranch refs/heads/main\n\nworktree /repo/worktrees/feat-x\nHEAD ef567890\nbranch refs/heads/feat/x\n";
    let root = Path::new("/repo");
    let ctx = AnnotateContext {
        root_path: root,
        cwd: None,
        context_dir: ".context",
    };

    let recs = annotate(parse_worktree_list(listing), &ctx);
    assert_eq!(recs.len(), 2);

    let forest = build_forest(recs, root);
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].record.display_name, "main");
    assert_eq!(forest[0].children.len(), 1);

    let child = &forest[0].children[0];
    assert_eq!(child.record.display_name, "feat-x");
    assert_eq!(child.record.branch_name.as_deref(), Some("feat/x"));
    assert!(child.is_leaf());
}

#[test]
fn test_plain_ancestry_is_not_nesting() {
    let forest = build_forest(
        records(&["/repo", "/repo/sub/other", "/repo/worktrees/a"]),
        Path::new("/repo"),
    );

    assert_eq!(
        root_paths(&forest),
        vec![Path::new("/repo"), Path::new("/repo/sub/other")]
    );
    assert_eq!(forest[0].children.len(), 1);
    assert_eq!(
        forest[0].children[0].record.path,
        PathBuf::from("/repo/worktrees/a")
    );
}

#[test]
fn test_sibling_directory_with_similar_name_is_not_nested() {
    // "worktrees-old" shares a string prefix with "worktrees" but is a different component
    let forest = build_forest(
        records(&["/repo", "/repo/worktrees-old/x", "/repo-worktrees/y"]),
        Path::new("/repo"),
    );
    assert_eq!(forest.len(), 3);
    assert!(forest.iter().all(WorktreeNode::is_leaf));
}

#[test]
fn test_deeper_path_under_nested_dir_is_child() {
    let forest = build_forest(
        records(&["/repo", "/repo/worktrees/team/feat-y"]),
        Path::new("/repo"),
    );
    assert_eq!(forest.len(), 1);
    assert_eq!(forest[0].children.len(), 1);
}

#[test]
fn test_nested_dir_itself_is_not_a_child() {
    assert!(!is_nested_under(
        Path::new("/repo"),
        Path::new("/repo/worktrees"),
        NESTED_WORKTREES_DIR
    ));
    assert!(is_nested_under(
        Path::new("/repo"),
        Path::new("/repo/worktrees/x"),
        NESTED_WORKTREES_DIR
    ));
}

#[test]
fn test_most_specific_parent_wins() {
    let forest = build_forest(
        records(&[
            "/repo",
            "/repo/worktrees/a",
            "/repo/worktrees/a/worktrees/b",
        ]),
        Path::new("/repo"),
    );

    assert_eq!(forest.len(), 1);
    let a = &forest[0].children;
    assert_eq!(a.len(), 1);
    assert_eq!(a[0].record.path, PathBuf::from("/repo/worktrees/a"));
    assert_eq!(a[0].children.len(), 1);
    assert_eq!(
        a[0].children[0].record.path,
        PathBuf::from("/repo/worktrees/a/worktrees/b")
    );
}

#[test]
fn test_parent_listed_after_child() {
    let forest = build_forest(
        records(&["/repo/worktrees/a/worktrees/b", "/repo/worktrees/a", "/repo"]),
        Path::new("/repo"),
    );

    assert_eq!(root_paths(&forest), vec![Path::new("/repo")]);
    assert_eq!(forest[0].subtree_len(), 3);
}

#[test]
fn test_roots_and_children_keep_listing_order() {
    let forest = build_forest(
        records(&[
            "/z-other",
            "/repo",
            "/repo/worktrees/c",
            "/a-other",
            "/repo/worktrees/a",
            "/repo/worktrees/b",
        ]),
        Path::new("/repo"),
    );

    assert_eq!(
        root_paths(&forest),
        vec![
            Path::new("/z-other"),
            Path::new("/repo"),
            Path::new("/a-other")
        ]
    );
    let names: Vec<&str> = forest[1]
        .children
        .iter()
        .map(|n| n.record.display_name.as_str())
        .collect();
    assert_eq!(names, vec!["c", "a", "b"]);
}

#[test]
fn test_orphan_nested_path_becomes_root() {
    // Parent /repo is absent from the listing
    let forest = build_forest(records(&["/repo/worktrees/a"]), Path::new("/repo"));
    assert_eq!(forest.len(), 1);
    assert!(forest[0].is_leaf());
}

#[test]
fn test_empty_listing_yields_empty_forest() {
    assert!(build_forest(Vec::new(), Path::new("/repo")).is_empty());
}

#[test]
fn test_completeness_and_acyclicity_across_orderings() {
    let base = [
        "/repo",
        "/repo/worktrees/a",
        "/repo/worktrees/a/worktrees/a1",
        "/repo/worktrees/a/worktrees/a1/worktrees/deep",
        "/repo/worktrees/b",
        "/repo/src/not-nested",
        "/elsewhere/x",
        "/elsewhere/x/worktrees/y",
    ];

    // Rotations and reversals cover parents both before and after children
    for shift in 0..base.len() {
        for reverse in [false, true] {
            let mut order: Vec<&str> = base
                .iter()
                .cycle()
                .skip(shift)
                .take(base.len())
                .copied()
                .collect();
            if reverse {
                order.reverse();
            }

            let forest = build_forest(records(&order), Path::new("/repo"));

            let got = paths_of(&forest);
            assert_eq!(got.len(), base.len(), "order {order:?}");
            let unique: HashSet<&PathBuf> = got.iter().collect();
            assert_eq!(unique.len(), base.len(), "duplicate node for order {order:?}");
            let expected: HashSet<PathBuf> = base.iter().map(PathBuf::from).collect();
            let expected: HashSet<&PathBuf> = expected.iter().collect();
            assert_eq!(unique, expected);

            for root in &forest {
                assert_acyclic(root, &mut Vec::new());
            }

            let root_set: HashSet<&Path> = root_paths(&forest).into_iter().collect();
            let expected_roots: HashSet<&Path> = ["/repo", "/repo/src/not-nested", "/elsewhere/x"]
                .iter()
                .map(|p| Path::new(*p))
                .collect();
            assert_eq!(root_set, expected_roots, "order {order:?}");
        }
    }
}

#[test]
fn test_custom_nested_dir() {
    let forest = build_forest_with(
        records(&["/repo", "/repo/.trees/x", "/repo/worktrees/y"]),
        Path::new("/repo"),
        ".trees",
    );
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children[0].record.display_name, "x");
}

struct PathNameProbe;

impl StatusProbe for PathNameProbe {
    fn has_changes(&self, worktree: &Path) -> Result<bool, ScanError> {
        let name = worktree.file_name().and_then(|n| n.to_str()).unwrap_or("");
        match name {
            "broken" => Err(ScanError::ProbeFailed {
                target: worktree.to_path_buf(),
                reason: "simulated".to_string(),
            }),
            name => Ok(name.starts_with("dirty")),
        }
    }
}

#[test]
fn test_change_overlay_marks_each_node_independently() {
    let mut forest = build_forest(
        records(&[
            "/repo",
            "/repo/worktrees/dirty-a",
            "/repo/worktrees/broken",
            "/repo/worktrees/dirty-a/worktrees/clean-b",
        ]),
        Path::new("/repo"),
    );

    apply_change_overlay(&mut forest, &PathNameProbe);

    let root = &forest[0];
    assert_eq!(root.changes, ChangeStatus::Clean);
    assert_eq!(root.children[0].changes, ChangeStatus::Dirty);
    assert_eq!(root.children[0].children[0].changes, ChangeStatus::Clean);
    assert_eq!(root.children[1].changes, ChangeStatus::Unknown);
}

#[test]
fn test_change_overlay_skips_bare_entries() {
    let mut bare = record("/repo/dirty.git");
    bare.is_bare = true;
    let mut forest = build_forest(vec![bare], Path::new("/repo"));

    apply_change_overlay(&mut forest, &PathNameProbe);
    assert_eq!(forest[0].changes, ChangeStatus::Unknown);
}

/// Reports a git timeout for `slow` and clean for everything else.
struct TimeoutOnSlow;

impl StatusProbe for TimeoutOnSlow {
    fn has_changes(&self, worktree: &Path) -> Result<bool, ScanError> {
        if worktree.ends_with("slow") {
            let timeout = CommandError::TimedOut {
                command: "git status --porcelain".to_string(),
                timeout: Duration::from_secs(10),
            };
            return Err(ScanError::ProbeFailed {
                target: worktree.to_path_buf(),
                reason: timeout.to_string(),
            });
        }
        Ok(false)
    }
}

#[test]
fn test_change_overlay_timed_out_node_is_unknown() {
    let mut forest = build_forest(
        records(&["/repo", "/repo/worktrees/slow", "/repo/worktrees/fast"]),
        Path::new("/repo"),
    );

    apply_change_overlay(&mut forest, &TimeoutOnSlow);

    let root = &forest[0];
    assert_eq!(root.changes, ChangeStatus::Clean);
    assert_eq!(root.children[0].changes, ChangeStatus::Unknown);
    assert_eq!(root.children[1].changes, ChangeStatus::Clean);
}

/// Tracks the highest number of overlapping `has_changes` calls.
#[derive(Default)]
struct ConcurrencyGauge {
    active: AtomicUsize,
    peak: AtomicUsize,
}

impl StatusProbe for ConcurrencyGauge {
    fn has_changes(&self, _worktree: &Path) -> Result<bool, ScanError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(5));
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(true)
    }
}

#[test]
fn test_change_overlay_bounds_concurrent_checks() {
    let mut paths = vec!["/repo".to_string()];
    paths.extend((0..64).map(|i| format!("/repo/worktrees/wt-{i}")));
    let paths: Vec<&str> = paths.iter().map(String::as_str).collect();
    let mut forest = build_forest(records(&paths), Path::new("/repo"));

    let gauge = ConcurrencyGauge::default();
    apply_change_overlay(&mut forest, &gauge);

    assert!(gauge.peak.load(Ordering::SeqCst) <= overlay_workers());
    assert_eq!(flatten(&forest).len(), 65);
    assert!(forest[0]
        .children
        .iter()
        .all(|child| child.changes == ChangeStatus::Dirty));
    assert_eq!(forest[0].changes, ChangeStatus::Dirty);
}
