//! Command-level mutations over the registry.
//!
//! Each function validates its arguments the way the command layer expects
//! (shape rules, active/deleted lookup, duplicate guards) and then applies
//! the corresponding registry primitive. All failures are ordinary
//! [`TaskError`] values.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::model::priority::Priority;
use crate::model::registry::Registry;
use crate::model::task::TaskId;
use crate::ops::error::TaskError;

/// Tags are single alphanumeric words.
static TAG_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9]+$").expect("tag pattern"));

/// List names are single alphabetic words.
static LIST_NAME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z]+$").expect("list name pattern"));

pub(crate) fn tag_shape_matches(tag: &str) -> bool {
    TAG_SHAPE.is_match(tag)
}

/// Add a task; the name must be non-empty and contain no whitespace.
/// Returns the assigned task number.
pub fn add_task(
    registry: &mut Registry,
    name: &str,
    priority: Option<Priority>,
    deadline: Option<NaiveDate>,
) -> Result<TaskId, TaskError> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(TaskError::InvalidName);
    }
    Ok(registry.add_task(name, priority, deadline))
}

/// Add an empty list with a unique, alphabetic name.
pub fn add_list(registry: &mut Registry, name: &str) -> Result<(), TaskError> {
    if !LIST_NAME_SHAPE.is_match(name) {
        return Err(TaskError::InvalidListName);
    }
    if registry.contains_list(name) {
        return Err(TaskError::ListExists);
    }
    registry.add_list(name);
    Ok(())
}

/// Make `child` a subtask of `parent`. Both must be active. Rejected when the
/// two are the same task or either already reaches the other through its
/// subtask tree — in that case nothing is mutated.
pub fn assign_to_task(
    registry: &mut Registry,
    child: TaskId,
    parent: TaskId,
) -> Result<(), TaskError> {
    if registry.task(child).is_none() || registry.task(parent).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    if child == parent
        || registry.subtree_contains(child, parent)
        || registry.subtree_contains(parent, child)
    {
        return Err(TaskError::CyclicAssignment);
    }
    registry.attach_subtask(parent, child);
    Ok(())
}

/// Add an active task to a list. Rejected when the list already holds the
/// task, directly or through a member's subtask tree.
pub fn assign_to_list(
    registry: &mut Registry,
    task: TaskId,
    list_name: &str,
) -> Result<(), TaskError> {
    if registry.task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    let list = registry.list(list_name).ok_or(TaskError::ListNotFound)?;
    if registry.list_reaches(list, task) {
        return Err(TaskError::AlreadyInList);
    }
    if let Some(list) = registry.list_mut(list_name) {
        list.add_task(task);
    }
    Ok(())
}

/// Tag an active task with an own tag; duplicate own tags are rejected.
pub fn tag_task(registry: &mut Registry, task: TaskId, tag: &str) -> Result<(), TaskError> {
    if !TAG_SHAPE.is_match(tag) {
        return Err(TaskError::InvalidTag);
    }
    let target = registry.task(task).ok_or(TaskError::TaskNotFound)?;
    if target.tags.iter().any(|t| t == tag) {
        return Err(TaskError::AlreadyTagged);
    }
    registry.tag_task(task, tag);
    Ok(())
}

/// Tag a list; the tag cascades onto every current member as an inherited
/// list tag. Duplicate list tags are rejected.
pub fn tag_list(registry: &mut Registry, list_name: &str, tag: &str) -> Result<(), TaskError> {
    if !TAG_SHAPE.is_match(tag) {
        return Err(TaskError::InvalidTag);
    }
    let list = registry.list(list_name).ok_or(TaskError::ListNotFound)?;
    if list.contains_tag(tag) {
        return Err(TaskError::AlreadyTagged);
    }
    registry.tag_list(list_name, tag);
    Ok(())
}

/// Change an active task's priority; `None` resets it to undefined.
pub fn change_priority(
    registry: &mut Registry,
    task: TaskId,
    priority: Option<Priority>,
) -> Result<(), TaskError> {
    if registry.task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    registry.node_mut(task).set_priority(priority);
    Ok(())
}

/// Replace an active task's deadline. The date is assumed validated by the
/// caller (see [`crate::parse::parse_date`]).
pub fn change_deadline(
    registry: &mut Registry,
    task: TaskId,
    deadline: NaiveDate,
) -> Result<(), TaskError> {
    if registry.task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    registry.node_mut(task).deadline = Some(deadline);
    Ok(())
}

/// Toggle an active task's done state, cascading the new value through every
/// non-deleted descendant. Returns the number of descendants affected.
pub fn toggle(registry: &mut Registry, task: TaskId) -> Result<usize, TaskError> {
    if registry.task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    Ok(registry.toggle_done(task))
}

/// Soft-delete an active task and its subtree. Returns the number of
/// descendants deleted (not counting the task itself).
pub fn delete(registry: &mut Registry, task: TaskId) -> Result<usize, TaskError> {
    if registry.task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    Ok(registry.delete(task))
}

/// Restore a deleted task and its deleted subtree. Returns the number of
/// descendants restored.
pub fn restore(registry: &mut Registry, task: TaskId) -> Result<usize, TaskError> {
    if registry.deleted_task(task).is_none() {
        return Err(TaskError::TaskNotFound);
    }
    Ok(registry.restore(task))
}
