//! Domain model for tasks and submissions.
//!
//! The task domain models published coursework, the at-most-one submission
//! each student holds per task, and the pure status derivation over both,
//! while keeping all infrastructure concerns outside of the domain
//! boundary.

mod category;
mod error;
mod ids;
mod status;
mod submission;
mod task;

pub use category::{ParseCategoryError, TaskCategory};
pub use error::TaskDomainError;
pub use ids::{SubmissionId, TaskId};
pub use status::{DerivedStatus, derive_status};
pub use submission::{Grade, PersistedSubmissionData, Submission, SubmissionStatus};
pub use task::{PersistedTaskData, Task, TaskDraft, TaskPriority};
