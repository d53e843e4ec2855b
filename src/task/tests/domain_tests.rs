//! Domain-focused tests for task and submission aggregates.

use crate::roster::domain::{SectionId, UserId};
use crate::task::domain::{
    Grade, Submission, SubmissionStatus, Task, TaskCategory, TaskDomainError, TaskDraft,
    TaskPriority,
};
use mockable::DefaultClock;
use rstest::rstest;

fn draft() -> TaskDraft {
    TaskDraft::new(
        "Graph traversal worksheet",
        TaskCategory::Assignment,
        TaskPriority::Medium,
        SectionId::new(),
    )
    .expect("valid draft")
}

#[rstest]
fn draft_trims_title_and_rejects_blank() {
    let trimmed = TaskDraft::new(
        "  Sorting lab  ",
        TaskCategory::LabReport,
        TaskPriority::Low,
        SectionId::new(),
    );
    assert!(trimmed.is_ok());

    let blank = TaskDraft::new("   ", TaskCategory::Task, TaskPriority::Low, SectionId::new());
    assert_eq!(blank.expect_err("blank title rejected"), TaskDomainError::EmptyTitle);
}

#[rstest]
fn draft_rejects_overlong_title() {
    let title = "x".repeat(101);
    let result = TaskDraft::new(title, TaskCategory::Task, TaskPriority::Low, SectionId::new());
    assert_eq!(
        result.expect_err("overlong title rejected"),
        TaskDomainError::TitleTooLong(101)
    );
}

#[rstest]
fn hundred_character_title_is_accepted() {
    let title = "x".repeat(100);
    let result = TaskDraft::new(title, TaskCategory::Task, TaskPriority::Low, SectionId::new());
    assert!(result.is_ok());
}

#[rstest]
fn new_task_starts_unpublished() {
    let task = Task::new(draft(), UserId::new(), &DefaultClock);
    assert!(!task.is_published());
    assert_eq!(task.published_at(), None);
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn publishing_twice_is_rejected() {
    let mut task = Task::new(draft(), UserId::new(), &DefaultClock);
    task.publish(&DefaultClock).expect("first publish succeeds");
    assert!(task.is_published());
    assert!(task.published_at().is_some());

    let result = task.publish(&DefaultClock);
    assert_eq!(result, Err(TaskDomainError::AlreadyPublished(task.id())));
}

#[rstest]
fn grade_is_bounded_to_one_hundred() {
    assert_eq!(Grade::new(0).expect("zero accepted").value(), 0);
    assert_eq!(Grade::new(100).expect("hundred accepted").value(), 100);
    assert_eq!(
        Grade::new(101).expect_err("out of range rejected"),
        TaskDomainError::GradeOutOfRange(101)
    );
}

#[rstest]
fn submission_starts_pending_without_body() {
    let submission = Submission::new(crate::task::domain::TaskId::new(), UserId::new(), &DefaultClock);
    assert_eq!(submission.status(), SubmissionStatus::Pending);
    assert_eq!(submission.body(), None);
    assert_eq!(submission.submitted_at(), None);
}

#[rstest]
fn submit_rejects_blank_body() {
    let mut submission =
        Submission::new(crate::task::domain::TaskId::new(), UserId::new(), &DefaultClock);
    let result = submission.submit("   ", &DefaultClock);
    assert_eq!(result, Err(TaskDomainError::EmptySubmissionBody));
    assert_eq!(submission.status(), SubmissionStatus::Pending);
}

#[rstest]
fn resubmitting_replaces_body_and_stays_submitted() {
    let mut submission =
        Submission::new(crate::task::domain::TaskId::new(), UserId::new(), &DefaultClock);
    submission
        .submit("First attempt", &DefaultClock)
        .expect("first submit succeeds");
    let first_instant = submission.submitted_at();

    submission
        .submit("Second attempt", &DefaultClock)
        .expect("resubmit succeeds");

    assert_eq!(submission.status(), SubmissionStatus::Submitted);
    assert_eq!(submission.body(), Some("Second attempt"));
    assert!(submission.submitted_at() >= first_instant);
}

#[rstest]
fn review_records_verdict_grade_and_reviewer() {
    let reviewer = UserId::new();
    let mut submission =
        Submission::new(crate::task::domain::TaskId::new(), UserId::new(), &DefaultClock);
    submission
        .submit("Completed worksheet", &DefaultClock)
        .expect("submit succeeds");

    submission.review(
        reviewer,
        SubmissionStatus::Approved,
        Some(Grade::new(92).expect("valid grade")),
        Some("Well structured".to_owned()),
        &DefaultClock,
    );

    assert_eq!(submission.status(), SubmissionStatus::Approved);
    assert_eq!(submission.grade().map(Grade::value), Some(92));
    assert_eq!(submission.feedback(), Some("Well structured"));
    assert_eq!(submission.reviewed_by(), Some(reviewer));
    assert!(submission.reviewed_at().is_some());
}

#[rstest]
#[case("assignment", TaskCategory::Assignment)]
#[case("lab-report", TaskCategory::LabReport)]
#[case("LAB_FINAL", TaskCategory::LabFinal)]
#[case("blc", TaskCategory::Blc)]
fn category_parses_storage_forms(#[case] raw: &str, #[case] expected: TaskCategory) {
    assert_eq!(TaskCategory::try_from(raw).expect("valid category"), expected);
}

#[rstest]
fn category_rejects_unknown_value() {
    assert!(TaskCategory::try_from("seminar").is_err());
}
