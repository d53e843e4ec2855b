//! Section statistics computed over service output.

use super::helpers::campus;
use campanile::analytics::{
    PerformanceBand, completion_rate, category_histogram, performance_buckets, status_counts,
};
use campanile::roster::ports::RosterRepository;
use campanile::task::{
    domain::{Grade, SubmissionStatus, TaskCategory, TaskDraft, TaskPriority, derive_status},
    ports::{SubmissionRepository, TaskQuery, TaskRepository},
    services::ReviewRequest,
};
use mockable::{Clock, DefaultClock};
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn section_overview_reflects_desk_activity() {
    let campus = campus().await;

    let drafts = [
        ("Graph worksheet", TaskCategory::Assignment),
        ("Week 4 quiz", TaskCategory::Quiz),
    ];
    let mut task_ids = Vec::new();
    for (title, category) in drafts {
        let draft = TaskDraft::new(
            title,
            category,
            TaskPriority::Medium,
            campus.section.id(),
        )
        .expect("valid draft");
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
        task_ids.push(task.id());
    }

    // All three students hand the worksheet in; nobody touches the quiz.
    for student in &campus.students {
        campus
            .submission_desk
            .submit(student.id(), task_ids[0], "Done", &DefaultClock)
            .await
            .expect("submission succeeds");
    }

    let tasks = campus
        .tasks
        .query(&TaskQuery::published(campus.section.id()))
        .await
        .expect("query succeeds");
    let submissions = campus
        .submissions
        .list_for_tasks(&task_ids)
        .await
        .expect("listing succeeds");
    let students = campus
        .roster
        .list_section_students(campus.section.id())
        .await
        .expect("listing succeeds");

    // Three of six (task, student) pairs are submitted.
    assert_eq!(completion_rate(&tasks, &submissions, students.len()), 50);

    let histogram = category_histogram(&tasks);
    let count_of = |category| {
        histogram
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.count)
    };
    assert_eq!(count_of(TaskCategory::Assignment), Some(1));
    assert_eq!(count_of(TaskCategory::Quiz), Some(1));
    assert_eq!(count_of(TaskCategory::Project), Some(0));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn graded_submissions_band_students() {
    let campus = campus().await;
    let draft = TaskDraft::new(
        "Graded worksheet",
        TaskCategory::Assignment,
        TaskPriority::Medium,
        campus.section.id(),
    )
    .expect("valid draft");
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

    for (student, grade) in campus.students.iter().zip([95_u16, 72, 40]) {
        let submission = campus
            .submission_desk
            .submit(student.id(), task.id(), "Done", &DefaultClock)
            .await
            .expect("submission succeeds");
        campus
            .submission_desk
            .review_submission(
                campus.admin.id(),
                submission.id(),
                ReviewRequest {
                    status: SubmissionStatus::Approved,
                    grade: Some(Grade::new(grade).expect("valid grade")),
                    feedback: None,
                },
                &DefaultClock,
            )
            .await
            .expect("review succeeds");
    }

    let submissions = campus
        .submissions
        .list_for_task(task.id())
        .await
        .expect("listing succeeds");
    let bands = performance_buckets(&submissions);
    assert_eq!(bands.len(), 3);

    let band_of = |user| {
        bands
            .iter()
            .find(|entry| entry.user == user)
            .map(|entry| entry.band)
    };
    assert_eq!(
        band_of(campus.students[0].id()),
        Some(PerformanceBand::Excellent)
    );
    assert_eq!(band_of(campus.students[1].id()), Some(PerformanceBand::Good));
    assert_eq!(
        band_of(campus.students[2].id()),
        Some(PerformanceBand::NeedsImprovement)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stats_strip_counts_derived_statuses() {
    let campus = campus().await;
    let student = &campus.students[0];
    let now = DefaultClock.utc();

    let draft = TaskDraft::new(
        "Open worksheet",
        TaskCategory::Assignment,
        TaskPriority::Medium,
        campus.section.id(),
    )
    .expect("valid draft");
    let open = campus
        .task_desk
        .create_task(campus.admin.id(), draft, &DefaultClock)
        .await
        .expect("creation succeeds");
    campus
        .task_desk
        .publish_task(campus.admin.id(), open.id(), &DefaultClock)
        .await
        .expect("publication succeeds");
    campus
        .submission_desk
        .submit(student.id(), open.id(), "Done", &DefaultClock)
        .await
        .expect("submission succeeds");

    let tasks = campus
        .tasks
        .query(&TaskQuery::published(campus.section.id()))
        .await
        .expect("query succeeds");
    let mut statuses = Vec::new();
    for task in &tasks {
        let submission = campus
            .submissions
            .find_by_task_and_user(task.id(), student.id())
            .await
            .expect("lookup succeeds");
        statuses.push(derive_status(task, submission.as_ref(), now));
    }

    let counts = status_counts(statuses);
    assert_eq!(counts.submitted, 1);
    assert_eq!(counts.total(), tasks.len());
}
