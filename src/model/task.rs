use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::priority::Priority;

/// Handle to a task in the registry arena.
///
/// Ids start at 1, are assigned in creation order and are never reused, even
/// after a task is soft-deleted.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TaskId(pub u32);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node in a task tree.
///
/// Children are owned through `subtasks` handles; `parent` is a non-owning
/// back-reference used for lookup only. Tasks are never removed from the
/// arena — deletion flips the `deleted` flag and restore flips it back, while
/// `was_deleted` stays set forever once a task has been deleted (it biases
/// the display ordering against historically-deleted tasks).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    pub priority: Priority,
    pub deadline: Option<NaiveDate>,
    pub done: bool,
    pub deleted: bool,
    pub was_deleted: bool,
    /// Own tags, in insertion order.
    pub tags: Vec<String>,
    /// Tags inherited from containing lists, kept apart from own tags so a
    /// rendered line never shows inherited tags.
    pub list_tags: Vec<String>,
    /// Owned children. Kept re-sorted by [`display_order`] on attachment.
    pub subtasks: Vec<TaskId>,
    pub parent: Option<TaskId>,
    /// Position assigned when attached as a subtask; repurposed as a
    /// deletion-order tie-break when the task is deleted under a parent.
    /// Zero means "not a subtask".
    pub subtask_number: u32,
    /// Running counter of deleted children, feeding the deletion-order
    /// tie-break stamped onto each child as it is deleted.
    pub deleted_children: u32,
}

impl Task {
    pub fn new(id: TaskId, name: impl Into<String>) -> Self {
        Task {
            id,
            name: name.into(),
            priority: Priority::Undefined,
            deadline: None,
            done: false,
            deleted: false,
            was_deleted: false,
            tags: Vec::new(),
            list_tags: Vec::new(),
            subtasks: Vec::new(),
            parent: None,
            subtask_number: 0,
            deleted_children: 0,
        }
    }

    /// Set the priority; `None` means back to undefined.
    pub fn set_priority(&mut self, priority: Option<Priority>) {
        self.priority = priority.unwrap_or(Priority::Undefined);
    }

    /// True if the tag appears among own tags or tags inherited from lists.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag) || self.list_tags.iter().any(|t| t == tag)
    }

    /// Zero-based position of `tag` in the own-tag sequence, or -1 when the
    /// tag was only inherited from a list. The -1 deliberately ranks such
    /// tasks ahead of position 0 in the tagged-with refinement.
    pub fn own_tag_position(&self, tag: &str) -> i64 {
        self.tags
            .iter()
            .position(|t| t == tag)
            .map_or(-1, |i| i as i64)
    }
}

/// One rendered line: checkbox, name, priority token (omitted when
/// undefined), own tags and ISO deadline.
///
/// ```text
/// - [x] Slides [HI]: (work, talk) --> 2023-07-01
/// ```
impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let check = if self.done { "x" } else { " " };
        write!(f, "- [{}] {}", check, self.name)?;
        if self.priority != Priority::Undefined {
            write!(f, " [{}]", self.priority.token())?;
        }
        if self.deadline.is_some() || !self.tags.is_empty() {
            write!(f, ":")?;
        }
        if !self.tags.is_empty() {
            write!(f, " ({})", self.tags.join(", "))?;
        }
        if let Some(deadline) = self.deadline {
            write!(f, " --> {}", deadline.format("%Y-%m-%d"))?;
        }
        Ok(())
    }
}

/// The display ordering relation over tasks.
///
/// Cascade:
/// 1. a task with deleted history sorts after one without;
/// 2. between two with deleted history, lower deletion-order number first;
/// 3. higher priority first;
/// 4. equal priority and both are subtasks: lower subtask number first;
/// 5. otherwise lower task number (creation order) first.
///
/// This is deliberately *not* an `Ord` impl: the relation is not consistent
/// with equality across mixed deleted/subtask populations, and several call
/// sites depend on the exact tie-break cascade.
pub fn display_order(a: &Task, b: &Task) -> Ordering {
    if a.was_deleted != b.was_deleted {
        return if a.was_deleted {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if a.was_deleted && b.was_deleted {
        match a.subtask_number.cmp(&b.subtask_number) {
            Ordering::Equal => {}
            ord => return ord,
        }
    }
    if a.priority != b.priority {
        return b.priority.rank().cmp(&a.priority.rank());
    }
    if a.subtask_number != 0 && b.subtask_number != 0 {
        return a.subtask_number.cmp(&b.subtask_number);
    }
    a.id.cmp(&b.id)
}

/// Priority-only comparator: higher priority first, everything else ties.
/// Used with stable sorts so the rest of the sequence keeps its prior order.
pub fn priority_order(a: &Task, b: &Task) -> Ordering {
    b.priority.rank().cmp(&a.priority.rank())
}
