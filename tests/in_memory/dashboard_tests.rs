//! Live dashboard sessions wired over the desk services.
//!
//! The snapshot source here is the reference wiring: a fetch is a scoped
//! task query plus the principal's own submissions, exactly what the
//! session re-reads after every change event.

use std::sync::Arc;
use std::time::Duration;

use super::helpers::{Campus, SubmissionDesk, TaskDesk, campus};
use campanile::live::adapters::memory::InMemoryChangeFeed;
use campanile::live::domain::{ChangeAction, ChangeEvent, SessionState, TaskSnapshot, Topic, ViewFilter};
use campanile::live::ports::{ChangeFeed, SnapshotError, SnapshotResult, SnapshotSource};
use campanile::live::session::DashboardSession;
use campanile::roster::adapters::memory::InMemoryRosterRepository;
use campanile::roster::domain::UserId;
use campanile::roster::ports::RosterRepository;
use campanile::task::domain::{DerivedStatus, TaskCategory, TaskDraft, TaskPriority};
use campanile::task::ports::TaskQuery;
use async_trait::async_trait;
use mockable::DefaultClock;
use rstest::rstest;
use uuid::Uuid;

struct DeskSnapshotSource {
    roster: Arc<InMemoryRosterRepository>,
    task_desk: TaskDesk,
    submission_desk: SubmissionDesk,
}

#[async_trait]
impl SnapshotSource for DeskSnapshotSource {
    async fn fetch(&self, principal: UserId) -> SnapshotResult<TaskSnapshot> {
        let viewer = self
            .roster
            .find_principal(principal)
            .await
            .map_err(SnapshotError::unavailable)?
            .ok_or(SnapshotError::PrincipalNotFound(principal))?;
        let section = viewer
            .section()
            .ok_or(SnapshotError::PrincipalNotFound(principal))?;
        let tasks = self
            .task_desk
            .scoped_tasks(principal, &TaskQuery::published(section))
            .await
            .map_err(SnapshotError::unavailable)?;
        let submissions = self
            .submission_desk
            .own_submissions(principal)
            .await
            .map_err(SnapshotError::unavailable)?;
        Ok(TaskSnapshot { tasks, submissions })
    }
}

fn desk_source(campus: &Campus) -> Arc<DeskSnapshotSource> {
    Arc::new(DeskSnapshotSource {
        roster: Arc::clone(&campus.roster),
        task_desk: campus.task_desk.clone(),
        submission_desk: campus.submission_desk.clone(),
    })
}

fn tasks_changed() -> ChangeEvent {
    ChangeEvent {
        action: ChangeAction::Insert,
        topic: Topic::Tasks,
        row_id: Uuid::new_v4(),
    }
}

fn submissions_changed() -> ChangeEvent {
    ChangeEvent {
        action: ChangeAction::Update,
        topic: Topic::TaskSubmissions,
        row_id: Uuid::new_v4(),
    }
}

async fn wait_for<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..100 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn publication_reaches_an_open_student_dashboard() {
    let campus = campus().await;
    let student = &campus.students[0];

    let session = Arc::new(DashboardSession::new(
        desk_source(&campus),
        Arc::new(DefaultClock),
        student.id(),
    ));
    session.refresh().await.expect("initial refresh succeeds");
    assert_eq!(session.state(), SessionState::Ready);
    assert!(session.views(&ViewFilter::ALL).is_empty());

    let feed = InMemoryChangeFeed::new();
    let subscription = feed
        .subscribe(&Topic::DASHBOARD)
        .await
        .expect("subscription opens");
    let _pump = session.spawn_feed_pump(subscription);

    let draft = TaskDraft::new(
        "Graph traversal worksheet",
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
    feed.publish(tasks_changed());

    let appeared = wait_for(|| session.views(&ViewFilter::ALL).len() == 1).await;
    assert!(appeared, "published task did not reach the dashboard");
    assert_eq!(
        session.views(&ViewFilter::ALL)[0].status,
        DerivedStatus::Pending
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hand_in_flips_the_dashboard_row_to_submitted() {
    let campus = campus().await;
    let student = &campus.students[0];

    let draft = TaskDraft::new(
        "Graph traversal worksheet",
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

    let session = Arc::new(DashboardSession::new(
        desk_source(&campus),
        Arc::new(DefaultClock),
        student.id(),
    ));
    session.refresh().await.expect("initial refresh succeeds");
    assert_eq!(
        session.views(&ViewFilter::ALL)[0].status,
        DerivedStatus::Pending
    );

    let feed = InMemoryChangeFeed::new();
    let subscription = feed
        .subscribe(&Topic::DASHBOARD)
        .await
        .expect("subscription opens");
    let _pump = session.spawn_feed_pump(subscription);

    campus
        .submission_desk
        .submit(student.id(), task.id(), "Completed worksheet", &DefaultClock)
        .await
        .expect("submission succeeds");
    feed.publish(submissions_changed());

    let flipped = wait_for(|| {
        session
            .views(&ViewFilter::ALL)
            .first()
            .is_some_and(|view| view.status == DerivedStatus::Submitted)
    })
    .await;
    assert!(flipped, "hand-in did not reach the dashboard");

    let submitted_only = session.views(&ViewFilter::ALL.with_status(DerivedStatus::Submitted));
    assert_eq!(submitted_only.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closed_dashboard_ignores_later_events() {
    let campus = campus().await;
    let student = &campus.students[0];

    let session = Arc::new(DashboardSession::new(
        desk_source(&campus),
        Arc::new(DefaultClock),
        student.id(),
    ));
    session.refresh().await.expect("initial refresh succeeds");

    let feed = InMemoryChangeFeed::new();
    let subscription = feed
        .subscribe(&Topic::DASHBOARD)
        .await
        .expect("subscription opens");
    let pump = session.spawn_feed_pump(subscription);

    session.close();
    feed.publish(tasks_changed());

    let finished = wait_for(|| pump.is_finished()).await;
    assert!(finished, "pump kept running after close");
    assert_eq!(session.state(), SessionState::Closed);
    assert!(session.refresh().await.is_err());
}
