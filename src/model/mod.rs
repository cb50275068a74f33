pub mod list;
pub mod priority;
pub mod registry;
pub mod task;

pub use list::TaskList;
pub use priority::Priority;
pub use registry::Registry;
pub use task::{Task, TaskId};
