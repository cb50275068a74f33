use std::collections::{BTreeSet, HashSet};

use chrono::NaiveDate;
use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::list::TaskList;
use crate::model::priority::Priority;
use crate::model::task::{Task, TaskId, display_order, priority_order};

/// Owns every task ever created and every list, and implements the
/// cross-cutting algorithms: lookup, assignment, soft delete / restore,
/// re-ordering after mutations, duplicate detection and tag search.
///
/// The arena's iteration order doubles as the flat display sequence: queries
/// re-sort it in place (stable), restore moves entries to the back, and the
/// interleaving of those operations is deliberately observable. Entries are
/// never removed, so a handle stored anywhere in the tree stays valid for the
/// registry's lifetime.
#[derive(Debug, Serialize, Deserialize)]
pub struct Registry {
    tasks: IndexMap<TaskId, Task>,
    lists: Vec<TaskList>,
    next_id: u32,
}

impl Registry {
    pub fn new() -> Self {
        Registry {
            tasks: IndexMap::new(),
            lists: Vec::new(),
            next_id: 1,
        }
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a task with the next sequential number and append it to the
    /// flat sequence. Returns the assigned handle.
    pub fn add_task(
        &mut self,
        name: impl Into<String>,
        priority: Option<Priority>,
        deadline: Option<NaiveDate>,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let mut task = Task::new(id, name);
        task.set_priority(priority);
        task.deadline = deadline;
        debug!("add task {}: {:?}", id, task.name);
        self.tasks.insert(id, task);
        id
    }

    pub fn add_list(&mut self, name: impl Into<String>) {
        self.lists.push(TaskList::new(name));
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    /// Active-task lookup; a deleted task is invisible here.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id).filter(|t| !t.deleted)
    }

    /// Deleted-task lookup; the mirror of [`Registry::task`]. A task is
    /// reachable through exactly one of the two.
    pub fn deleted_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id).filter(|t| t.deleted)
    }

    /// Lookup regardless of deletion state.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id)
    }

    pub fn list(&self, name: &str) -> Option<&TaskList> {
        self.lists.iter().find(|l| l.name == name)
    }

    pub fn list_mut(&mut self, name: &str) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|l| l.name == name)
    }

    pub fn contains_list(&self, name: &str) -> bool {
        self.list(name).is_some()
    }

    pub(crate) fn node(&self, id: TaskId) -> &Task {
        &self.tasks[&id]
    }

    pub(crate) fn node_mut(&mut self, id: TaskId) -> &mut Task {
        &mut self.tasks[&id]
    }

    // -----------------------------------------------------------------------
    // Ordering views
    // -----------------------------------------------------------------------

    /// Re-sort the flat sequence by the full display relation and return it.
    /// The sort is stable and persists, as later priority-only sorts build on
    /// whatever order this one left behind.
    pub fn tasks_by_relation(&mut self) -> Vec<TaskId> {
        self.tasks.sort_by(|_, a, _, b| display_order(a, b));
        self.tasks.keys().copied().collect()
    }

    /// Re-sort the flat sequence by priority only (stable) and return it.
    pub fn tasks_by_priority(&mut self) -> Vec<TaskId> {
        self.tasks.sort_by(|_, a, _, b| priority_order(a, b));
        self.tasks.keys().copied().collect()
    }

    /// A task's children sorted by the full display relation.
    pub fn sorted_children(&self, id: TaskId) -> Vec<TaskId> {
        let mut children = self.node(id).subtasks.clone();
        children.sort_by(|&a, &b| display_order(self.node(a), self.node(b)));
        children
    }

    // -----------------------------------------------------------------------
    // Tree queries
    // -----------------------------------------------------------------------

    /// True if `needle` is a proper descendant of `root`.
    pub fn subtree_contains(&self, root: TaskId, needle: TaskId) -> bool {
        self.node(root)
            .subtasks
            .iter()
            .any(|&c| c == needle || self.subtree_contains(c, needle))
    }

    /// True if the task's own name, or any ancestor's name, contains the
    /// fragment — a name match propagates downward to the whole subtree.
    pub fn name_chain_contains(&self, id: TaskId, fragment: &str) -> bool {
        let task = self.node(id);
        if task.name.contains(fragment) {
            return true;
        }
        match task.parent {
            Some(parent) => self.name_chain_contains(parent, fragment),
            None => false,
        }
    }

    /// True if the list holds the task directly or reaches it through the
    /// subtask tree of any direct member.
    pub fn list_reaches(&self, list: &TaskList, id: TaskId) -> bool {
        list.contains_direct(id)
            || list.tasks.iter().any(|&m| self.subtree_contains(m, id))
    }

    /// Names of all lists that (deeply) contain the task.
    pub fn parent_lists(&self, id: TaskId) -> Vec<String> {
        self.lists
            .iter()
            .filter(|l| self.list_reaches(l, id))
            .map(|l| l.name.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Reassignment
    // -----------------------------------------------------------------------

    /// Attach `child` under `parent`: detach from any prior parent first,
    /// stamp the new sibling position, re-sort the siblings, then drop the
    /// child's direct list memberships wherever a list now reaches it
    /// transitively. Cycle rejection is the caller's responsibility.
    pub fn attach_subtask(&mut self, parent: TaskId, child: TaskId) {
        if let Some(old_parent) = self.node(child).parent {
            self.detach_subtask(old_parent, child);
        }
        debug!("attach task {} under {}", child, parent);
        let position = self.node(parent).subtasks.len() as u32 + 1;
        {
            let c = self.node_mut(child);
            c.parent = Some(parent);
            c.subtask_number = position;
        }
        self.node_mut(parent).subtasks.push(child);
        self.sort_children(parent);
        self.adjust_lists_for(child);
    }

    /// Remove `child` from `parent`'s children and clear the back-reference.
    /// Does not mark the child deleted.
    pub fn detach_subtask(&mut self, parent: TaskId, child: TaskId) {
        self.node_mut(child).parent = None;
        self.node_mut(parent).subtasks.retain(|&c| c != child);
    }

    fn sort_children(&mut self, parent: TaskId) {
        let mut children = self.node(parent).subtasks.clone();
        children.sort_by(|&a, &b| display_order(self.node(a), self.node(b)));
        self.node_mut(parent).subtasks = children;
    }

    /// For every list that reaches `child` through a member's subtask tree,
    /// remove every direct membership of `child` — the list still reaches it
    /// transitively, so an independent entry would render it twice.
    fn adjust_lists_for(&mut self, child: TaskId) {
        for i in 0..self.lists.len() {
            let reaches = self.lists[i]
                .tasks
                .iter()
                .any(|&m| self.subtree_contains(m, child));
            if reaches {
                self.lists[i].tasks.retain(|&t| t != child);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Soft delete / restore
    // -----------------------------------------------------------------------

    /// Soft-delete the task and, depth-first, every not-yet-deleted
    /// descendant. Each deleted child is stamped with its parent's running
    /// deletion counter, which from then on serves as the deletion-order
    /// tie-break in the display relation. Returns the number of descendants
    /// deleted, not counting the task itself.
    pub fn delete(&mut self, id: TaskId) -> usize {
        let mut deleted = 0;
        for child in self.node(id).subtasks.clone() {
            if !self.node(child).deleted {
                deleted += self.delete(child) + 1;
            }
        }
        {
            let task = self.node_mut(id);
            task.deleted = true;
            task.was_deleted = true;
        }
        if let Some(parent) = self.node(id).parent {
            let order = {
                let p = self.node_mut(parent);
                p.deleted_children += 1;
                p.deleted_children
            };
            self.node_mut(id).subtask_number = order;
        }
        debug!("delete task {} ({} descendants)", id, deleted);
        deleted
    }

    /// Restore a deleted task and, depth-first, every deleted descendant.
    ///
    /// When the owning parent is itself still deleted the task first reverts
    /// to a plain top-level task: it is re-added to every list that used to
    /// reach it transitively, detached from the parent, and moved to the end
    /// of the flat sequence. Returns the number of descendants restored.
    pub fn restore(&mut self, id: TaskId) -> usize {
        if let Some(parent) = self.node(id).parent
            && self.node(parent).deleted
        {
            let containing: Vec<usize> = (0..self.lists.len())
                .filter(|&i| self.list_reaches(&self.lists[i], id))
                .collect();
            for i in containing {
                self.lists[i].add_task(id);
            }
            self.detach_subtask(parent, id);
            self.move_to_back(id);
        }
        debug!("restore task {}", id);
        self.restore_subtree(id)
    }

    fn restore_subtree(&mut self, id: TaskId) -> usize {
        self.node_mut(id).deleted = false;
        self.reorder_after_change(id);
        let mut restored = 0;
        for child in self.sorted_children(id) {
            if self.node(child).deleted {
                restored += self.restore_subtree(child) + 1;
            }
        }
        restored
    }

    /// Move a task to the end of the flat sequence without re-sorting.
    pub fn move_to_back(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.shift_remove(&id) {
            self.tasks.insert(id, task);
        }
    }

    /// Re-establish ordering after a mutation that can change a task's
    /// position: pull the task out of the flat sequence, move any direct list
    /// membership to the end of its list, move the task to the end of its
    /// sibling scope wherever a subtree holds it, re-append it and re-sort
    /// the flat sequence by priority.
    pub fn reorder_after_change(&mut self, id: TaskId) {
        let Some(task) = self.tasks.shift_remove(&id) else {
            return;
        };
        for list in &mut self.lists {
            list.move_to_end(id);
        }
        let scopes: Vec<TaskId> = self.tasks.keys().copied().collect();
        for scope in scopes {
            self.move_child_to_end(scope, id);
        }
        self.tasks.insert(id, task);
        self.tasks.sort_by(|_, a, _, b| priority_order(a, b));
    }

    fn move_child_to_end(&mut self, scope: TaskId, target: TaskId) {
        let children = self.node(scope).subtasks.clone();
        if children.contains(&target) {
            let siblings = &mut self.node_mut(scope).subtasks;
            siblings.retain(|&c| c != target);
            siblings.push(target);
        } else {
            for child in children {
                self.move_child_to_end(child, target);
            }
        }
    }

    // -----------------------------------------------------------------------
    // Done cascade
    // -----------------------------------------------------------------------

    /// Flip the task's done state and push the new value onto every
    /// non-deleted descendant. Returns the number of non-deleted descendants.
    pub fn toggle_done(&mut self, id: TaskId) -> usize {
        let value = !self.node(id).done;
        self.node_mut(id).done = value;
        for child in self.sorted_children(id) {
            if !self.node(child).deleted {
                self.set_done_cascade(child, value);
            }
        }
        self.count_active_descendants(id)
    }

    fn set_done_cascade(&mut self, id: TaskId, value: bool) {
        self.node_mut(id).done = value;
        for child in self.node(id).subtasks.clone() {
            if !self.node(child).deleted {
                self.set_done_cascade(child, value);
            }
        }
    }

    fn count_active_descendants(&self, id: TaskId) -> usize {
        self.node(id)
            .subtasks
            .iter()
            .filter(|&&c| !self.node(c).deleted)
            .map(|&c| self.count_active_descendants(c) + 1)
            .sum()
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    pub fn tag_task(&mut self, id: TaskId, tag: &str) {
        self.node_mut(id).tags.push(tag.to_string());
    }

    /// Tag a list and cascade the tag onto every current member as an
    /// inherited list tag. Members added later do not pick the tag up, and
    /// removal from the list never takes it away again.
    pub fn tag_list(&mut self, name: &str, tag: &str) {
        let Some(index) = self.lists.iter().position(|l| l.name == name) else {
            return;
        };
        self.lists[index].tags.push(tag.to_string());
        let members = self.lists[index].tasks.clone();
        for member in members {
            self.node_mut(member).list_tags.push(tag.to_string());
        }
    }

    /// All tasks carrying the tag (own or inherited), ordered by the display
    /// relation and then refined: priority first, then the position of the
    /// tag among *own* tags (inherited-only ranks ahead of position 0), then
    /// task number. Deleted carriers stay in the result; rendering skips
    /// them.
    pub fn tagged_tasks(&self, tag: &str) -> Vec<TaskId> {
        let mut hits: Vec<TaskId> = self
            .tasks
            .values()
            .filter(|t| t.has_tag(tag))
            .map(|t| t.id)
            .collect();
        hits.sort_by(|&a, &b| display_order(self.node(a), self.node(b)));
        hits.sort_by(|&a, &b| {
            let (ta, tb) = (self.node(a), self.node(b));
            if ta.priority != tb.priority {
                return tb.priority.rank().cmp(&ta.priority.rank());
            }
            ta.own_tag_position(tag)
                .cmp(&tb.own_tag_position(tag))
                .then(ta.id.cmp(&tb.id))
        });
        hits
    }

    // -----------------------------------------------------------------------
    // Duplicates
    // -----------------------------------------------------------------------

    /// Zero-based positions (task number − 1) of every active task implicated
    /// in at least one duplicate pair: same name, and a missing deadline on
    /// either side or equal deadlines. Sorted and deduplicated.
    pub fn duplicates(&self) -> Vec<u32> {
        let mut hits = BTreeSet::new();
        for a in self.tasks.values() {
            for b in self.tasks.values() {
                if a.id == b.id || a.deleted || b.deleted {
                    continue;
                }
                let name_match = a.name == b.name;
                let date_match = a.deadline.is_none()
                    || b.deadline.is_none()
                    || a.deadline == b.deadline;
                if name_match && date_match {
                    hits.insert(a.id.0 - 1);
                    hits.insert(b.id.0 - 1);
                }
            }
        }
        hits.into_iter().collect()
    }

    // -----------------------------------------------------------------------
    // List views
    // -----------------------------------------------------------------------

    /// The list's visible members: deleted entries and duplicate entries are
    /// dropped, the rest come in priority order (stable over the stored
    /// membership sequence, which is re-sorted in place).
    pub fn list_tasks(&mut self, name: &str) -> Option<Vec<TaskId>> {
        let index = self.lists.iter().position(|l| l.name == name)?;
        let mut members = self.lists[index].tasks.clone();
        members.sort_by(|&a, &b| priority_order(self.node(a), self.node(b)));
        self.lists[index].tasks = members.clone();
        let mut seen = HashSet::new();
        Some(
            members
                .into_iter()
                .filter(|&m| !self.node(m).deleted && seen.insert(m))
                .collect(),
        )
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    #[test]
    fn numbers_are_sequential_from_one() {
        let mut reg = Registry::new();
        assert_eq!(reg.add_task("a", None, None), TaskId(1));
        assert_eq!(reg.add_task("b", None, None), TaskId(2));
        assert_eq!(reg.add_task("c", None, None), TaskId(3));
    }

    #[test]
    fn active_and_deleted_lookups_are_disjoint() {
        let mut reg = Registry::new();
        let id = reg.add_task("a", None, None);
        assert!(reg.task(id).is_some());
        assert!(reg.deleted_task(id).is_none());

        reg.delete(id);
        assert!(reg.task(id).is_none());
        assert!(reg.deleted_task(id).is_some());

        reg.restore(id);
        assert!(reg.task(id).is_some());
        assert!(reg.deleted_task(id).is_none());
    }

    #[test]
    fn delete_counts_descendants_and_cascades() {
        let mut reg = Registry::new();
        let root = reg.add_task("root", None, None);
        let mid = reg.add_task("mid", None, None);
        let leaf = reg.add_task("leaf", None, None);
        reg.attach_subtask(root, mid);
        reg.attach_subtask(mid, leaf);

        assert_eq!(reg.delete(root), 2);
        for id in [root, mid, leaf] {
            assert!(reg.deleted_task(id).is_some());
            assert!(reg.deleted_task(id).is_some_and(|t| t.was_deleted));
        }
    }

    #[test]
    fn delete_skips_already_deleted_descendants() {
        let mut reg = Registry::new();
        let root = reg.add_task("root", None, None);
        let a = reg.add_task("a", None, None);
        let b = reg.add_task("b", None, None);
        reg.attach_subtask(root, a);
        reg.attach_subtask(root, b);

        reg.delete(a);
        // Only b is still active below root.
        assert_eq!(reg.delete(root), 1);
    }

    #[test]
    fn restore_is_inverse_of_delete_for_a_subtree() {
        let mut reg = Registry::new();
        let root = reg.add_task("root", None, None);
        let mid = reg.add_task("mid", None, None);
        let leaf = reg.add_task("leaf", None, None);
        reg.attach_subtask(root, mid);
        reg.attach_subtask(mid, leaf);

        let removed = reg.delete(root);
        let restored = reg.restore(root);
        assert_eq!(removed, restored);
        for id in [root, mid, leaf] {
            assert!(reg.task(id).is_some());
        }
        // The sticky marker survives the restore.
        assert!(reg.task(root).is_some_and(|t| t.was_deleted));
    }

    #[test]
    fn restoring_under_a_deleted_parent_detaches_the_task() {
        let mut reg = Registry::new();
        let parent = reg.add_task("parent", None, None);
        let child = reg.add_task("child", None, None);
        reg.attach_subtask(parent, child);
        reg.delete(parent);

        let restored = reg.restore(child);
        assert_eq!(restored, 0);
        let child_task = reg.task(child).expect("child restored");
        assert_eq!(child_task.parent, None);
        // The parent stays deleted and no longer owns the child.
        let parent_task = reg.deleted_task(parent).expect("parent still deleted");
        assert!(!parent_task.subtasks.contains(&child));
    }

    #[test]
    fn restoring_a_transitively_listed_subtask_rejoins_its_lists() {
        let mut reg = Registry::new();
        let parent = reg.add_task("parent", None, None);
        let child = reg.add_task("child", None, None);
        reg.add_list("work");
        reg.list_mut("work").expect("list").add_task(parent);
        reg.attach_subtask(parent, child);
        reg.delete(parent);

        reg.restore(child);
        // The list reached the child only through the deleted parent; after
        // the restore it holds the child directly.
        let list = reg.list("work").expect("list");
        assert!(list.contains_direct(child));
    }

    #[test]
    fn attach_detaches_from_previous_parent() {
        let mut reg = Registry::new();
        let first = reg.add_task("first", None, None);
        let second = reg.add_task("second", None, None);
        let child = reg.add_task("child", None, None);

        reg.attach_subtask(first, child);
        reg.attach_subtask(second, child);

        assert!(!reg.task(first).expect("first").subtasks.contains(&child));
        assert!(reg.task(second).expect("second").subtasks.contains(&child));
        assert_eq!(reg.task(child).expect("child").parent, Some(second));
    }

    #[test]
    fn attach_drops_now_redundant_list_memberships() {
        let mut reg = Registry::new();
        let parent = reg.add_task("parent", None, None);
        let child = reg.add_task("child", None, None);
        reg.add_list("work");
        {
            let list = reg.list_mut("work").expect("list");
            list.add_task(parent);
            list.add_task(child);
        }

        reg.attach_subtask(parent, child);
        let list = reg.list("work").expect("list");
        assert!(!list.contains_direct(child));
        // Still reachable through the parent though.
        assert!(reg.list_reaches(list, child));
    }

    #[test]
    fn subtree_contains_is_proper_and_transitive() {
        let mut reg = Registry::new();
        let a = reg.add_task("a", None, None);
        let b = reg.add_task("b", None, None);
        let c = reg.add_task("c", None, None);
        reg.attach_subtask(a, b);
        reg.attach_subtask(b, c);

        assert!(reg.subtree_contains(a, b));
        assert!(reg.subtree_contains(a, c));
        assert!(!reg.subtree_contains(a, a));
        assert!(!reg.subtree_contains(c, a));
    }

    #[test]
    fn name_chain_matches_own_and_ancestor_names() {
        let mut reg = Registry::new();
        let report = reg.add_task("Report", None, None);
        let slides = reg.add_task("Slides", None, None);
        reg.attach_subtask(report, slides);

        assert!(reg.name_chain_contains(slides, "Slide"));
        assert!(reg.name_chain_contains(slides, "Rep"));
        // Matches never propagate upward from descendants.
        assert!(!reg.name_chain_contains(report, "Slide"));
    }

    #[test]
    fn toggle_cascades_to_active_descendants_only() {
        let mut reg = Registry::new();
        let root = reg.add_task("root", None, None);
        let kept = reg.add_task("kept", None, None);
        let gone = reg.add_task("gone", None, None);
        reg.attach_subtask(root, kept);
        reg.attach_subtask(root, gone);
        reg.delete(gone);

        assert_eq!(reg.toggle_done(root), 1);
        assert!(reg.task(root).expect("root").done);
        assert!(reg.task(kept).expect("kept").done);
        assert!(!reg.deleted_task(gone).expect("gone").done);

        assert_eq!(reg.toggle_done(root), 1);
        assert!(!reg.task(kept).expect("kept").done);
    }

    #[test]
    fn duplicates_match_on_name_and_compatible_deadlines() {
        let mut reg = Registry::new();
        reg.add_task("Buy milk", None, None);
        reg.add_task("Buy milk", None, None);
        reg.add_task("Other", None, None);
        assert_eq!(reg.duplicates(), vec![0, 1]);

        // A third task with the same name expands, never shrinks, the set.
        reg.add_task("Buy milk", None, Some(date(2023, 7, 1)));
        assert_eq!(reg.duplicates(), vec![0, 1, 3]);
    }

    #[test]
    fn differing_explicit_deadlines_are_not_duplicates() {
        let mut reg = Registry::new();
        reg.add_task("Buy milk", None, Some(date(2023, 7, 1)));
        reg.add_task("Buy milk", None, Some(date(2023, 7, 2)));
        assert_eq!(reg.duplicates(), Vec::<u32>::new());

        let mut reg = Registry::new();
        reg.add_task("Buy milk", None, Some(date(2023, 7, 1)));
        reg.add_task("Buy milk", None, Some(date(2023, 7, 1)));
        assert_eq!(reg.duplicates(), vec![0, 1]);
    }

    #[test]
    fn deleted_tasks_do_not_count_as_duplicates() {
        let mut reg = Registry::new();
        let first = reg.add_task("Buy milk", None, None);
        reg.add_task("Buy milk", None, None);
        reg.delete(first);
        assert_eq!(reg.duplicates(), Vec::<u32>::new());
    }

    #[test]
    fn tagged_tasks_prefer_earlier_own_tags() {
        let mut reg = Registry::new();
        let late = reg.add_task("late", None, None);
        let early = reg.add_task("early", None, None);
        reg.tag_task(late, "other");
        reg.tag_task(late, "shared");
        reg.tag_task(early, "shared");

        // Same priority: "shared" is at position 1 for `late`, 0 for `early`.
        assert_eq!(reg.tagged_tasks("shared"), vec![early, late]);
    }

    #[test]
    fn inherited_list_tags_rank_before_own_position_zero() {
        let mut reg = Registry::new();
        let tagged = reg.add_task("tagged", None, None);
        let listed = reg.add_task("listed", None, None);
        reg.tag_task(tagged, "urgent");
        reg.add_list("work");
        reg.list_mut("work").expect("list").add_task(listed);
        reg.tag_list("work", "urgent");

        // The inherited carrier sorts first despite its higher number.
        assert_eq!(reg.tagged_tasks("urgent"), vec![listed, tagged]);
    }

    #[test]
    fn tag_list_cascade_is_not_retroactive() {
        let mut reg = Registry::new();
        let before = reg.add_task("before", None, None);
        reg.add_list("work");
        reg.list_mut("work").expect("list").add_task(before);
        reg.tag_list("work", "urgent");

        let after = reg.add_task("after", None, None);
        reg.list_mut("work").expect("list").add_task(after);
        assert!(reg.task(before).expect("before").has_tag("urgent"));
        assert!(!reg.task(after).expect("after").has_tag("urgent"));
    }

    #[test]
    fn list_view_drops_deleted_and_duplicate_members() {
        let mut reg = Registry::new();
        let a = reg.add_task("a", None, None);
        let b = reg.add_task("b", None, None);
        reg.add_list("work");
        {
            let list = reg.list_mut("work").expect("list");
            list.add_task(a);
            list.add_task(b);
            list.add_task(a);
        }
        reg.delete(b);

        assert_eq!(reg.list_tasks("work"), Some(vec![a]));
        assert_eq!(reg.list_tasks("missing"), None);
    }

    #[test]
    fn list_view_orders_by_priority() {
        let mut reg = Registry::new();
        let low = reg.add_task("low", None, None);
        let high = reg.add_task("high", Some(Priority::Hi), None);
        reg.add_list("work");
        {
            let list = reg.list_mut("work").expect("list");
            list.add_task(low);
            list.add_task(high);
        }
        assert_eq!(reg.list_tasks("work"), Some(vec![high, low]));
    }

    #[test]
    fn relation_sort_persists_into_priority_sort() {
        let mut reg = Registry::new();
        let a = reg.add_task("a", None, None);
        let b = reg.add_task("b", Some(Priority::Hi), None);
        let c = reg.add_task("c", None, None);

        assert_eq!(reg.tasks_by_relation(), vec![b, a, c]);
        // The priority-only sort is stable over the order the full sort left.
        assert_eq!(reg.tasks_by_priority(), vec![b, a, c]);
    }

    #[test]
    fn reorder_after_change_moves_task_to_end_of_its_scopes() {
        let mut reg = Registry::new();
        let root = reg.add_task("root", None, None);
        let first = reg.add_task("first", None, None);
        let second = reg.add_task("second", None, None);
        reg.attach_subtask(root, first);
        reg.attach_subtask(root, second);

        reg.reorder_after_change(first);
        // Stored sibling order has `first` at the end now; the sorted view
        // still ranks by subtask number.
        assert_eq!(
            reg.task(root).expect("root").subtasks,
            vec![second, first]
        );
        assert_eq!(reg.sorted_children(root), vec![first, second]);
    }
}
