pub mod dates;
pub mod error;
pub mod queries;
pub mod task_ops;

pub use error::TaskError;
pub use queries::VisibleTask;
