//! Listing queries.
//!
//! Every query produces an ordered sequence of [`VisibleTask`] rows; the
//! caller renders each row indented proportionally to its depth (or uses
//! [`render`]). Queries that walk overlapping trees thread a visited set
//! keyed by task id through the traversal, so a task reachable both as a
//! root and as someone's subtask is emitted once and orphaned subtasks are
//! suppressed. Plain subtree listings (`show`, `list_tasks`, `tagged_with`)
//! carry no visited set, matching the duplicate-tolerant behavior of their
//! command counterparts.

use std::collections::HashSet;
use std::fmt::Write as _;

use serde::Serialize;

use crate::model::registry::Registry;
use crate::model::task::TaskId;
use crate::ops::error::TaskError;
use crate::ops::task_ops::tag_shape_matches;

/// One row of query output: a task and its indentation depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleTask {
    pub id: TaskId,
    pub depth: usize,
}

impl VisibleTask {
    fn new(id: TaskId, depth: usize) -> Self {
        VisibleTask { id, depth }
    }
}

/// Render rows as text, two spaces of indent per depth level.
pub fn render(registry: &Registry, rows: &[VisibleTask]) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        if let Some(task) = registry.get(row.id) {
            let _ = write!(out, "{}{}", "  ".repeat(row.depth), task);
        }
    }
    out
}

/// Emit a task and its whole subtree, skipping deleted nodes.
fn push_subtree(registry: &Registry, id: TaskId, depth: usize, out: &mut Vec<VisibleTask>) {
    let Some(task) = registry.get(id) else { return };
    if task.deleted {
        return;
    }
    out.push(VisibleTask::new(id, depth));
    for child in registry.sorted_children(id) {
        push_subtree(registry, child, depth + 1, out);
    }
}

/// A single active task with its subtree.
pub fn show(registry: &Registry, id: TaskId) -> Result<Vec<VisibleTask>, TaskError> {
    if registry.task(id).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    let mut rows = Vec::new();
    push_subtree(registry, id, 0, &mut rows);
    Ok(rows)
}

/// The visible members of a named list, each with its subtree.
pub fn list_tasks(registry: &mut Registry, name: &str) -> Result<Vec<VisibleTask>, TaskError> {
    let members = registry.list_tasks(name).ok_or(TaskError::ListNotFound)?;
    let mut rows = Vec::new();
    for member in members {
        push_subtree(registry, member, 0, &mut rows);
    }
    Ok(rows)
}

/// Tasks carrying the tag, in the refined tag order, each with its subtree.
pub fn tagged_with(registry: &Registry, tag: &str) -> Result<Vec<VisibleTask>, TaskError> {
    if !tag_shape_matches(tag) {
        return Err(TaskError::InvalidTag);
    }
    let mut rows = Vec::new();
    for id in registry.tagged_tasks(tag) {
        push_subtree(registry, id, 0, &mut rows);
    }
    Ok(rows)
}

/// All open work: roots in priority order; a task is shown when it is
/// active, not yet shown, its parent (if any) is shown above it, and it is
/// either not done or still has an undone task somewhere below it.
pub fn todo(registry: &mut Registry) -> Vec<VisibleTask> {
    let roots = registry.tasks_by_priority();
    let mut visited = HashSet::new();
    let mut rows = Vec::new();
    for root in roots {
        todo_walk(registry, &mut visited, root, 0, &mut rows);
    }
    rows
}

fn todo_walk(
    registry: &Registry,
    visited: &mut HashSet<TaskId>,
    id: TaskId,
    depth: usize,
    out: &mut Vec<VisibleTask>,
) -> bool {
    let task = registry.node(id);
    if task.deleted || visited.contains(&id) {
        return false;
    }
    if task.parent.is_some_and(|p| !visited.contains(&p)) {
        return false;
    }
    if task.done && !has_undone_below(registry, id) {
        return false;
    }
    out.push(VisibleTask::new(id, depth));
    visited.insert(id);
    for child in registry.sorted_children(id) {
        todo_walk(registry, visited, child, depth + 1, out);
    }
    true
}

/// The open-work probe deliberately ignores the deleted flag on descendants.
fn has_undone_below(registry: &Registry, id: TaskId) -> bool {
    registry
        .node(id)
        .subtasks
        .iter()
        .any(|&c| has_undone_below(registry, c) || !registry.node(c).done)
}

/// Tasks whose own name or an ancestor's name contains the fragment, roots
/// in full relation order.
pub fn find(registry: &mut Registry, fragment: &str) -> Vec<VisibleTask> {
    let roots = registry.tasks_by_relation();
    let mut visited = HashSet::new();
    let mut rows = Vec::new();
    for root in roots {
        find_walk(registry, &mut visited, root, 0, fragment, &mut rows);
    }
    rows
}

fn find_walk(
    registry: &Registry,
    visited: &mut HashSet<TaskId>,
    id: TaskId,
    depth: usize,
    fragment: &str,
    out: &mut Vec<VisibleTask>,
) {
    let task = registry.node(id);
    if task.deleted || visited.contains(&id) {
        return;
    }
    if !registry.name_chain_contains(id, fragment) {
        return;
    }
    out.push(VisibleTask::new(id, depth));
    visited.insert(id);
    for child in registry.sorted_children(id) {
        find_walk(registry, visited, child, depth + 1, fragment, out);
    }
}

/// 1-based display numbers of every task implicated in a duplicate pair.
pub fn duplicates(registry: &Registry) -> Vec<u32> {
    registry.duplicates().into_iter().map(|i| i + 1).collect()
}
