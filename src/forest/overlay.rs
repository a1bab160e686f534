//! Uncommitted-changes overlay

use std::num::NonZeroUsize;
use std::path::Path;
use std::thread;
use tracing::warn;

use crate::git::StatusProbe;
use crate::models::worktree::{ChangeStatus, WorktreeNode};

/// Probe every node in the forest and record the result in its `changes` slot.
///
/// Nodes are probed concurrently on at most [`overlay_workers`] scoped
/// threads. A failed probe leaves that node `Unknown` and does not affect any
/// other node.
pub fn apply_change_overlay(forest: &mut [WorktreeNode], probe: &dyn StatusProbe) {
    let mut slots = Vec::new();
    for node in forest.iter_mut() {
        collect_slots(node, &mut slots);
    }
    if slots.is_empty() {
        return;
    }

    let chunk_size = slots.len().div_ceil(overlay_workers());
    thread::scope(|scope| {
        for chunk in slots.chunks_mut(chunk_size) {
            scope.spawn(move || {
                for (path, slot) in chunk.iter_mut() {
                    **slot = probe_one(probe, *path);
                }
            });
        }
    });
}

/// Upper bound on concurrent probes, one per available core.
pub fn overlay_workers() -> usize {
    thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

fn probe_one(probe: &dyn StatusProbe, path: &Path) -> ChangeStatus {
    match probe.has_changes(path) {
        Ok(true) => ChangeStatus::Dirty,
        Ok(false) => ChangeStatus::Clean,
        Err(e) => {
            warn!(error = %e, "uncommitted-changes probe failed");
            ChangeStatus::Unknown
        }
    }
}

fn collect_slots<'a>(node: &'a mut WorktreeNode, out: &mut Vec<(&'a Path, &'a mut ChangeStatus)>) {
    let WorktreeNode {
        record,
        changes,
        children,
    } = node;
    // bare entries have no working tree to inspect
    if !record.is_bare {
        out.push((record.path.as_path(), changes));
    }
    for child in children.iter_mut() {
        collect_slots(child, out);
    }
}
