//! JSON views of the registry for machine consumers.
//!
//! The text rendering lives on [`Task`]'s `Display` impl and in
//! [`crate::ops::queries::render`]; this module mirrors it as serializable
//! structures. Deleted subtrees are skipped the same way the text listings
//! skip them.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::priority::Priority;
use crate::model::registry::Registry;
use crate::model::task::{Task, TaskId};
use crate::ops::queries::VisibleTask;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub done: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct ListJson {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub tasks: Vec<TaskJson>,
}

/// One query row with its depth, for flat (non-nested) output.
#[derive(Serialize)]
pub struct RowJson {
    pub depth: usize,
    #[serde(flatten)]
    pub task: FlatTaskJson,
}

/// A task without its subtree, used inside [`RowJson`].
#[derive(Serialize)]
pub struct FlatTaskJson {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    pub done: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

fn visible_priority(task: &Task) -> Option<Priority> {
    (task.priority != Priority::Undefined).then_some(task.priority)
}

fn flat_task(task: &Task) -> FlatTaskJson {
    FlatTaskJson {
        id: task.id.0,
        name: task.name.clone(),
        priority: visible_priority(task),
        deadline: task.deadline,
        done: task.done,
        tags: task.tags.clone(),
    }
}

/// A task and its non-deleted subtree as nested JSON.
pub fn task_to_json(registry: &Registry, id: TaskId) -> Option<TaskJson> {
    let task = registry.get(id)?;
    if task.deleted {
        return None;
    }
    Some(TaskJson {
        id: task.id.0,
        name: task.name.clone(),
        priority: visible_priority(task),
        deadline: task.deadline,
        done: task.done,
        tags: task.tags.clone(),
        subtasks: registry
            .sorted_children(id)
            .into_iter()
            .filter_map(|c| task_to_json(registry, c))
            .collect(),
    })
}

/// A list with its visible members, sorted the way the list query sorts them.
pub fn list_to_json(registry: &mut Registry, name: &str) -> Option<ListJson> {
    let members = registry.list_tasks(name)?;
    let tags = registry
        .list(name)
        .map(|l| l.tags.clone())
        .unwrap_or_default();
    Some(ListJson {
        name: name.to_string(),
        tags,
        tasks: members
            .into_iter()
            .filter_map(|id| task_to_json(registry, id))
            .collect(),
    })
}

/// Query rows as flat JSON records carrying their indentation depth.
pub fn rows_to_json(registry: &Registry, rows: &[VisibleTask]) -> Vec<RowJson> {
    rows.iter()
        .filter_map(|row| {
            registry.get(row.id).map(|task| RowJson {
                depth: row.depth,
                task: flat_task(task),
            })
        })
        .collect()
}
