use colored::{ColoredString, Colorize};

use crate::models::worktree::{ChangeStatus, WorktreeNode};

/// Render the forest as an indented tree, one line per worktree.
pub fn forest_lines(forest: &[WorktreeNode]) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, node) in forest.iter().enumerate() {
        push_node(node, "", i + 1 == forest.len(), &mut lines);
    }
    lines
}

fn push_node(node: &WorktreeNode, prefix: &str, last: bool, lines: &mut Vec<String>) {
    let connector = if last { "└── " } else { "├── " };
    lines.push(format!("{prefix}{connector}{}", node_label(node)));

    let child_prefix = format!("{prefix}{}", if last { "    " } else { "│   " });
    for (i, child) in node.children.iter().enumerate() {
        push_node(child, &child_prefix, i + 1 == node.children.len(), lines);
    }
}

/// `branch #issue [current] *` plus the worktree name when it differs from the branch
pub fn node_label(node: &WorktreeNode) -> String {
    let record = &node.record;
    let mut label = if record.is_detached {
        record.branch_label().dimmed().to_string()
    } else {
        record.branch_label().bold().to_string()
    };

    if record.display_name != record.branch_label() {
        label.push_str(&format!(" ({})", record.display_name).dimmed().to_string());
    }
    if let Some(issue) = &record.associated_task_id {
        label.push_str(&format!(" #{issue}").magenta().to_string());
    }
    if record.is_current {
        label.push_str(&format!(" {}", "[current]".cyan()));
    }
    if record.locked.is_some() {
        label.push_str(&format!(" {}", "[locked]".yellow()));
    }
    if record.prunable.is_some() {
        label.push_str(&format!(" {}", "[prunable]".red()));
    }
    label.push_str(&format!(" {}", format_changes(node.changes)));
    label
}

pub fn format_changes(changes: ChangeStatus) -> ColoredString {
    match changes {
        ChangeStatus::Dirty => "*".yellow().bold(),
        ChangeStatus::Clean => "✓".green(),
        ChangeStatus::Unknown => "?".dimmed(),
    }
}
