//! End-to-end task lifecycle tests across the desk services.

use super::helpers::{Campus, campus};
use campanile::task::{
    domain::{Grade, SubmissionStatus, TaskCategory, TaskDraft, TaskPriority},
    ports::TaskQuery,
    services::{ReviewRequest, SubmissionDeskError, TaskDeskError},
};
use chrono::TimeDelta;
use mockable::{Clock, DefaultClock};
use rstest::rstest;

fn worksheet_draft(campus: &Campus) -> TaskDraft {
    TaskDraft::new(
        "Graph traversal worksheet",
        TaskCategory::Assignment,
        TaskPriority::Medium,
        campus.section.id(),
    )
    .expect("valid draft")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn draft_publish_submit_review_round_trip() {
    let campus = campus().await;
    let student = &campus.students[0];

    let task = campus
        .task_desk
        .create_task(campus.admin.id(), worksheet_draft(&campus), &DefaultClock)
        .await
        .expect("creation succeeds");

    // Unpublished work is invisible to the section and closed to hand-ins.
    let hidden = campus
        .task_desk
        .scoped_tasks(student.id(), &TaskQuery::published(campus.section.id()))
        .await
        .expect("query succeeds");
    assert!(hidden.is_empty());
    let early = campus
        .submission_desk
        .submit(student.id(), task.id(), "Too early", &DefaultClock)
        .await;
    assert!(matches!(early, Err(SubmissionDeskError::Access(_))));

    campus
        .task_desk
        .publish_task(campus.admin.id(), task.id(), &DefaultClock)
        .await
        .expect("publication succeeds");

    let submission = campus
        .submission_desk
        .submit(student.id(), task.id(), "Completed worksheet", &DefaultClock)
        .await
        .expect("submission succeeds");
    assert_eq!(submission.status(), SubmissionStatus::Submitted);

    let reviewed = campus
        .submission_desk
        .review_submission(
            campus.admin.id(),
            submission.id(),
            ReviewRequest {
                status: SubmissionStatus::Approved,
                grade: Some(Grade::new(91).expect("valid grade")),
                feedback: Some("Clean work".to_owned()),
            },
            &DefaultClock,
        )
        .await
        .expect("review succeeds");
    assert_eq!(reviewed.grade().map(Grade::value), Some(91));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_admin_gains_capability_only_after_activation() {
    let campus = campus().await;

    let before = campus
        .task_desk
        .create_task(
            campus.pending_admin.id(),
            worksheet_draft(&campus),
            &DefaultClock,
        )
        .await;
    assert!(matches!(before, Err(TaskDeskError::Access(_))));

    campus
        .membership
        .activate_section_admin(campus.super_admin.id(), campus.pending_admin.id())
        .await
        .expect("activation succeeds");

    let after = campus
        .task_desk
        .create_task(
            campus.pending_admin.id(),
            worksheet_draft(&campus),
            &DefaultClock,
        )
        .await;
    assert!(after.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn detached_student_loses_section_visibility() {
    let campus = campus().await;
    let student = &campus.students[0];

    let task = campus
        .task_desk
        .create_task(campus.admin.id(), worksheet_draft(&campus), &DefaultClock)
        .await
        .expect("creation succeeds");
    campus
        .task_desk
        .publish_task(campus.admin.id(), task.id(), &DefaultClock)
        .await
        .expect("publication succeeds");

    let visible = campus
        .task_desk
        .scoped_tasks(student.id(), &TaskQuery::published(campus.section.id()))
        .await
        .expect("query succeeds");
    assert_eq!(visible.len(), 1);

    campus
        .membership
        .detach_member(campus.admin.id(), student.id())
        .await
        .expect("detachment succeeds");

    let gone = campus
        .task_desk
        .scoped_tasks(student.id(), &TaskQuery::published(campus.section.id()))
        .await
        .expect("query succeeds");
    assert!(gone.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn promoted_student_can_publish_but_no_longer_submit() {
    let campus = campus().await;
    let student = &campus.students[0];

    let task = campus
        .task_desk
        .create_task(campus.admin.id(), worksheet_draft(&campus), &DefaultClock)
        .await
        .expect("creation succeeds");
    campus
        .task_desk
        .publish_task(campus.admin.id(), task.id(), &DefaultClock)
        .await
        .expect("publication succeeds");

    campus
        .membership
        .promote_to_section_admin(campus.admin.id(), student.id())
        .await
        .expect("promotion succeeds");

    let submit = campus
        .submission_desk
        .submit(student.id(), task.id(), "Still a student?", &DefaultClock)
        .await;
    assert!(matches!(submit, Err(SubmissionDeskError::Access(_))));

    let own_task = campus
        .task_desk
        .create_task(student.id(), worksheet_draft(&campus), &DefaultClock)
        .await;
    assert!(own_task.is_ok());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn due_window_query_matches_inclusive_range() {
    let campus = campus().await;
    let now = DefaultClock.utc();

    let this_week = TaskDraft::new(
        "Due this week",
        TaskCategory::Assignment,
        TaskPriority::Medium,
        campus.section.id(),
    )
    .expect("valid draft")
    .with_due(now + TimeDelta::days(2));
    let next_month = TaskDraft::new(
        "Due next month",
        TaskCategory::Assignment,
        TaskPriority::Low,
        campus.section.id(),
    )
    .expect("valid draft")
    .with_due(now + TimeDelta::days(40));

    for draft in [this_week, next_month] {
        let task = campus
            .task_desk
            .create_task(campus.admin.id(), draft, &DefaultClock)
            .await
            .expect("creation succeeds");
        campus
            .task_desk
            .publish_task(campus.admin.id(), task.id(), &DefaultClock)
            .await
            .expect("publication succeeds");
    }

    let query = TaskQuery::published(campus.section.id())
        .with_due_between(now, now + TimeDelta::days(7));
    let upcoming = campus
        .task_desk
        .scoped_tasks(campus.students[0].id(), &query)
        .await
        .expect("query succeeds");
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].title(), "Due this week");
}
