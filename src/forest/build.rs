//! Forest construction from a flat worktree listing

use std::path::Path;
use tracing::debug;

use crate::models::worktree::{WorktreeNode, WorktreeRecord};

/// Directory inside a worktree reserved for worktrees nested under it
pub const NESTED_WORKTREES_DIR: &str = "worktrees";

/// True iff `child` lives under `<parent>/<nested_dir>/...`.
///
/// Plain filesystem ancestry is not enough: a worktree sitting in some other
/// subdirectory of `parent` is not nested under it.
pub fn is_nested_under(parent: &Path, child: &Path, nested_dir: &str) -> bool {
    child
        .strip_prefix(parent.join(nested_dir))
        .is_ok_and(|rest| rest.components().next().is_some())
}

/// Build the worktree forest using the default nesting directory.
pub fn build_forest(records: Vec<WorktreeRecord>, root_path: &Path) -> Vec<WorktreeNode> {
    build_forest_with(records, root_path, NESTED_WORKTREES_DIR)
}

/// Build the worktree forest.
///
/// Each record gets at most one parent. When several records qualify, the one
/// with the longest path wins (most specific nesting directory), with ties
/// going to the earlier record; the choice is stable for identical input.
/// Records without a parent become roots, kept in listing order, and children
/// keep listing order too. Every record appears exactly once in the result.
pub fn build_forest_with(
    records: Vec<WorktreeRecord>,
    root_path: &Path,
    nested_dir: &str,
) -> Vec<WorktreeNode> {
    // Parents can appear after their children in the listing, so every
    // parent is resolved before any node is assembled.
    let parents: Vec<Option<usize>> = (0..records.len())
        .map(|index| find_parent(&records, index, nested_dir))
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); records.len()];
    let mut roots = Vec::new();
    for (index, parent) in parents.iter().enumerate() {
        match parent {
            Some(parent) => children[*parent].push(index),
            None => roots.push(index),
        }
    }

    let root_matches = roots
        .iter()
        .filter(|&&index| records[index].path == root_path)
        .count();
    if root_matches != 1 {
        debug!(
            root = %root_path.display(),
            root_matches,
            roots = roots.len(),
            "forest roots do not contain exactly one root worktree"
        );
    }

    let mut slots: Vec<Option<WorktreeRecord>> = records.into_iter().map(Some).collect();
    roots
        .into_iter()
        .filter_map(|index| assemble(index, &mut slots, &children))
        .collect()
}

fn find_parent(records: &[WorktreeRecord], index: usize, nested_dir: &str) -> Option<usize> {
    let child = &records[index].path;
    let mut best: Option<(usize, usize)> = None;

    for (candidate, record) in records.iter().enumerate() {
        if candidate == index || !is_nested_under(&record.path, child, nested_dir) {
            continue;
        }
        let depth = record.path.components().count();
        match best {
            Some((_, best_depth)) if best_depth >= depth => {}
            _ => best = Some((candidate, depth)),
        }
    }

    best.map(|(candidate, _)| candidate)
}

fn assemble(
    index: usize,
    slots: &mut [Option<WorktreeRecord>],
    children: &[Vec<usize>],
) -> Option<WorktreeNode> {
    let record = slots[index].take()?;
    let mut node = WorktreeNode::new(record);
    node.children = children[index]
        .iter()
        .filter_map(|&child| assemble(child, slots, children))
        .collect();
    Some(node)
}

/// All records in the forest, depth-first, parents before children.
pub fn flatten(forest: &[WorktreeNode]) -> Vec<&WorktreeRecord> {
    let mut out = Vec::new();
    for node in forest {
        collect(node, &mut out);
    }
    out
}

fn collect<'a>(node: &'a WorktreeNode, out: &mut Vec<&'a WorktreeRecord>) {
    out.push(&node.record);
    for child in &node.children {
        collect(child, out);
    }
}
