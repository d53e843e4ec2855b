//! In-memory task and submission adapters.

mod submission;
mod task;

pub use submission::InMemorySubmissionRepository;
pub use task::InMemoryTaskRepository;
