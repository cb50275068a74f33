//! Date-window queries: `before`, `between` and `upcoming`.
//!
//! These share the traversal shape of the other filtered listings (roots in
//! flat order, visited set, children only under a shown or already-shown
//! ancestor) but each carries its own eligibility cascade. The cascades are
//! intricate by design and are preserved exactly: a task without a deadline
//! is always date-eligible, a dated subtask can surface without its parent
//! when the parent falls outside the window, and an undated subtask is
//! suppressed unless its parent was shown first.

use std::collections::HashSet;

use chrono::{Days, NaiveDate};

use crate::model::registry::Registry;
use crate::model::task::{Task, TaskId};
use crate::ops::queries::VisibleTask;

/// Whole days from `earlier` to `later`; negative when `later` precedes it.
fn days_after(later: NaiveDate, earlier: NaiveDate) -> i64 {
    later.signed_duration_since(earlier).num_days()
}

// ---------------------------------------------------------------------------
// before
// ---------------------------------------------------------------------------

/// Tasks due on or before `date`, roots in priority order.
pub fn before(registry: &mut Registry, date: NaiveDate) -> Vec<VisibleTask> {
    let roots = registry.tasks_by_priority();
    let mut visited = HashSet::new();
    let mut rows = Vec::new();
    for root in roots {
        before_walk(registry, &mut visited, root, 0, date, &mut rows);
    }
    rows
}

fn before_walk(
    registry: &Registry,
    visited: &mut HashSet<TaskId>,
    id: TaskId,
    depth: usize,
    date: NaiveDate,
    out: &mut Vec<VisibleTask>,
) {
    if !before_eligible(registry, visited, id, date) {
        return;
    }
    out.push(VisibleTask { id, depth });
    visited.insert(id);
    for child in registry.sorted_children(id) {
        before_walk(registry, visited, child, depth + 1, date, out);
    }
}

fn before_eligible(
    registry: &Registry,
    visited: &HashSet<TaskId>,
    id: TaskId,
    date: NaiveDate,
) -> bool {
    let task = registry.node(id);
    if task.deleted || visited.contains(&id) {
        return false;
    }
    // An undated subtask only ever rides along under a shown parent.
    if task.deadline.is_none() && task.parent.is_some_and(|p| !visited.contains(&p)) {
        return false;
    }
    if !before_root_gate(visited, task, date) {
        return false;
    }
    // A dated subtask inside the window is always eligible once the gates
    // above pass.
    if task.parent.is_some() && task.deadline.is_some_and(|d| d <= date) {
        return true;
    }
    before_window_gate(registry, visited, task, date)
}

/// Root-versus-subtask split: a root needs its own deadline inside the
/// window; a subtask needs a deadline of its own or an already-shown parent.
fn before_root_gate(visited: &HashSet<TaskId>, task: &Task, date: NaiveDate) -> bool {
    (task.parent.is_none()
        || task.deadline.is_some()
        || task.parent.is_some_and(|p| visited.contains(&p)))
        && (task.parent.is_some() || task.deadline.is_some_and(|d| d <= date))
}

fn before_window_gate(
    registry: &Registry,
    visited: &HashSet<TaskId>,
    task: &Task,
    date: NaiveDate,
) -> bool {
    let in_window = task.deadline.is_none_or(|d| d <= date);
    let parent_shown_or_outside = match task.parent {
        None => true,
        Some(p) => {
            visited.contains(&p)
                || registry.node(p).deadline.is_some_and(|d| d > date)
        }
    };
    (in_window || task.parent.is_some()) && parent_shown_or_outside
}

// ---------------------------------------------------------------------------
// between
// ---------------------------------------------------------------------------

/// Tasks due between `start` and `end` (inclusive), roots in priority order.
pub fn between(registry: &mut Registry, start: NaiveDate, end: NaiveDate) -> Vec<VisibleTask> {
    let roots = registry.tasks_by_priority();
    let mut visited = HashSet::new();
    let mut rows = Vec::new();
    for root in roots {
        between_walk(registry, &mut visited, root, 0, start, end, &mut rows);
    }
    rows
}

fn between_walk(
    registry: &Registry,
    visited: &mut HashSet<TaskId>,
    id: TaskId,
    depth: usize,
    start: NaiveDate,
    end: NaiveDate,
    out: &mut Vec<VisibleTask>,
) {
    if !between_eligible(registry, visited, id, start, end)
        || !between_parent_gate(registry, visited, id, start, end)
    {
        return;
    }
    out.push(VisibleTask { id, depth });
    visited.insert(id);
    for child in registry.sorted_children(id) {
        between_walk(registry, visited, child, depth + 1, start, end, out);
    }
}

/// Deadline probe for the between-window: an undated task passes, a dated
/// task with children defers to its first child (sorted order), a dated leaf
/// must fall inside the window.
fn deadline_probe(registry: &Registry, id: TaskId, start: NaiveDate, end: NaiveDate) -> bool {
    let task = registry.node(id);
    match task.deadline {
        None => true,
        Some(d) => match registry.sorted_children(id).first() {
            Some(&first) => deadline_probe(registry, first, start, end),
            None => d >= start && d <= end,
        },
    }
}

/// True if the probe passes for the task or any of its ancestors.
fn ancestor_probe(registry: &Registry, id: TaskId, start: NaiveDate, end: NaiveDate) -> bool {
    deadline_probe(registry, id, start, end)
        || registry
            .node(id)
            .parent
            .is_some_and(|p| ancestor_probe(registry, p, start, end))
}

fn between_eligible(
    registry: &Registry,
    visited: &HashSet<TaskId>,
    id: TaskId,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    let task = registry.node(id);
    if task.deleted || visited.contains(&id) {
        return false;
    }
    let in_window = task.deadline.is_none() || deadline_probe(registry, id, start, end);
    let parent_undated = task
        .parent
        .is_some_and(|p| registry.node(p).deadline.is_none());
    in_window || parent_undated || ancestor_probe(registry, id, start, end)
}

fn between_parent_gate(
    registry: &Registry,
    visited: &HashSet<TaskId>,
    id: TaskId,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    let task = registry.node(id);
    if task.deadline.is_none() && task.parent.is_some_and(|p| !visited.contains(&p)) {
        return false;
    }
    match task.parent {
        None => true,
        Some(p) => {
            visited.contains(&p)
                || registry.node(p).deadline.is_some_and(|d| {
                    // Strictly inside the window with a day of slack on
                    // either side.
                    days_after(d, start) > 1 && days_after(end, d) > 1
                })
        }
    }
}

// ---------------------------------------------------------------------------
// upcoming
// ---------------------------------------------------------------------------

/// Tasks due within the seven days following `date` (inclusive), roots in
/// full relation order.
pub fn upcoming(registry: &mut Registry, date: NaiveDate) -> Vec<VisibleTask> {
    let Some(end) = date.checked_add_days(Days::new(7)) else {
        return Vec::new();
    };
    let roots = registry.tasks_by_relation();
    let mut visited = HashSet::new();
    let mut rows = Vec::new();
    for root in roots {
        upcoming_walk(registry, &mut visited, root, 0, date, end, &mut rows);
    }
    rows
}

fn upcoming_walk(
    registry: &Registry,
    visited: &mut HashSet<TaskId>,
    id: TaskId,
    depth: usize,
    start: NaiveDate,
    end: NaiveDate,
    out: &mut Vec<VisibleTask>,
) {
    if !upcoming_eligible(registry, visited, id, start, end) {
        return;
    }
    out.push(VisibleTask { id, depth });
    visited.insert(id);
    for child in registry.sorted_children(id) {
        upcoming_walk(registry, visited, child, depth + 1, start, end, out);
    }
}

fn in_window(task: &Task, start: NaiveDate, end: NaiveDate) -> bool {
    task.deadline.is_none_or(|d| d >= start && d <= end)
}

fn upcoming_eligible(
    registry: &Registry,
    visited: &HashSet<TaskId>,
    id: TaskId,
    start: NaiveDate,
    end: NaiveDate,
) -> bool {
    let task = registry.node(id);
    if task.deleted
        || visited.contains(&id)
        || (task.deadline.is_none() && task.parent.is_some_and(|p| !visited.contains(&p)))
    {
        return false;
    }
    if task.parent.is_none() && in_window(task, start, end) {
        return true;
    }
    match task.parent {
        None => false,
        Some(p) => {
            visited.contains(&p)
                || (!in_window(registry.node(p), start, end) && in_window(task, start, end))
        }
    }
}
