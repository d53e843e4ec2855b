//! Application services for task lifecycle orchestration.

mod desk;
mod submission_desk;

pub use desk::{TaskDeskError, TaskDeskResult, TaskDeskService};
pub use submission_desk::{
    ReviewRequest, SubmissionDeskError, SubmissionDeskResult, SubmissionDeskService,
};
