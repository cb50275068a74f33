//! In-memory hierarchical task tracker core.
//!
//! Tasks form ownership trees (a subtask has exactly one parent), can be
//! grouped into named [`TaskList`]s, tagged, prioritized, dated, soft-deleted
//! and restored. The [`Registry`] owns every task ever created and implements
//! the cross-cutting algorithms: ordering, duplicate detection, tag search,
//! reassignment and restore-repair. The `ops` module exposes the command-level
//! operations and listing queries an outer command layer calls into.

pub mod model;
pub mod ops;
pub mod outcome;
pub mod output;
pub mod parse;

pub use model::list::TaskList;
pub use model::priority::Priority;
pub use model::registry::Registry;
pub use model::task::{Task, TaskId};
pub use ops::error::TaskError;
pub use ops::queries::VisibleTask;
pub use outcome::Outcome;
