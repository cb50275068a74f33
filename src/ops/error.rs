/// Error type for task operations.
///
/// Every variant is an expected command-level outcome — a lookup miss or a
/// rejected argument — never a fault. The outer command layer translates
/// these into failure messages; nothing here aborts the process.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    #[error("the task can not be found")]
    TaskNotFound,
    #[error("the list can not be found")]
    ListNotFound,
    #[error("the task name must be non-empty and free of whitespace")]
    InvalidName,
    #[error("the list name does not have the correct format")]
    InvalidListName,
    #[error("the list already exists")]
    ListExists,
    #[error("the tag does not have the correct format")]
    InvalidTag,
    #[error("the given tag is already present")]
    AlreadyTagged,
    #[error("the task is already in the list")]
    AlreadyInList,
    #[error("a task can not be assigned to itself or across its own subtree")]
    CyclicAssignment,
}
