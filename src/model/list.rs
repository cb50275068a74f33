use serde::{Deserialize, Serialize};

use crate::model::task::TaskId;

/// A named, non-owning grouping of tasks.
///
/// Membership is by handle; a task may belong to any number of lists and
/// simultaneously be a subtask of another task. The internal sequence may
/// hold duplicate entries — the deduplicated, deleted-free view is produced
/// by [`Registry::list_tasks`](crate::Registry::list_tasks). Operations that
/// need the task arena (deep containment, the membership `adjust` repair)
/// live on the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub name: String,
    pub tags: Vec<String>,
    pub tasks: Vec<TaskId>,
}

impl TaskList {
    pub fn new(name: impl Into<String>) -> Self {
        TaskList {
            name: name.into(),
            tags: Vec::new(),
            tasks: Vec::new(),
        }
    }

    pub fn contains_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Direct membership only; transitive reach through subtask trees is
    /// checked by the registry.
    pub fn contains_direct(&self, id: TaskId) -> bool {
        self.tasks.contains(&id)
    }

    pub fn add_task(&mut self, id: TaskId) {
        self.tasks.push(id);
    }

    /// Move a direct membership to the end of the sequence, keeping it in
    /// place otherwise. Used by reorder-after-change so a freshly mutated
    /// task loses its old position before the next stable sort.
    pub fn move_to_end(&mut self, id: TaskId) {
        if let Some(pos) = self.tasks.iter().position(|&t| t == id) {
            self.tasks.remove(pos);
            self.tasks.push(id);
        }
    }
}
