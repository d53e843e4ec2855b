//! Shared campus fixture for the in-memory integration suites.

use std::sync::Arc;

use campanile::roster::{
    adapters::memory::InMemoryRosterRepository,
    domain::{Batch, Department, Principal, Section},
    ports::RosterRepository,
    services::MembershipService,
};
use campanile::task::{
    adapters::memory::{InMemorySubmissionRepository, InMemoryTaskRepository},
    services::{SubmissionDeskService, TaskDeskService},
};

/// Task desk wired to the in-memory adapters.
pub type TaskDesk = TaskDeskService<InMemoryTaskRepository, InMemoryRosterRepository>;

/// Submission desk wired to the in-memory adapters.
pub type SubmissionDesk = SubmissionDeskService<
    InMemorySubmissionRepository,
    InMemoryTaskRepository,
    InMemoryRosterRepository,
>;

/// A seeded campus: one section, its staff, and three active students.
pub struct Campus {
    pub roster: Arc<InMemoryRosterRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub task_desk: TaskDesk,
    pub submission_desk: SubmissionDesk,
    pub membership: MembershipService<InMemoryRosterRepository>,
    pub section: Section,
    pub super_admin: Principal,
    pub admin: Principal,
    pub pending_admin: Principal,
    pub students: Vec<Principal>,
}

/// Seeds the organizational hierarchy, staff, and students every suite
/// builds on.
pub async fn campus() -> Campus {
    let roster = Arc::new(InMemoryRosterRepository::new());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let submissions = Arc::new(InMemorySubmissionRepository::new());

    let department = Department::new("Computer Science", "CSE").expect("valid department");
    roster
        .store_department(&department)
        .await
        .expect("department stores");
    let batch = Batch::new("Batch 58", department.id()).expect("valid batch");
    roster.store_batch(&batch).await.expect("batch stores");
    let section = Section::new("Section A", batch.id()).expect("valid section");
    roster.store_section(&section).await.expect("section stores");

    let super_admin = Principal::new_super_admin("Registry", "registry@example.edu")
        .expect("valid super admin");
    roster
        .store_principal(&super_admin)
        .await
        .expect("super admin stores");

    let mut admin =
        Principal::new_pending_section_admin("Rafiq Islam", "rafiq@example.edu", section.id())
            .expect("valid admin");
    admin.set_active(true);
    roster.store_principal(&admin).await.expect("admin stores");

    let pending_admin =
        Principal::new_pending_section_admin("Nusrat Jahan", "nusrat@example.edu", section.id())
            .expect("valid admin");
    roster
        .store_principal(&pending_admin)
        .await
        .expect("pending admin stores");

    let mut students = Vec::new();
    for (name, email) in [
        ("Anika Rahman", "anika@example.edu"),
        ("Tanvir Hasan", "tanvir@example.edu"),
        ("Farhan Ahmed", "farhan@example.edu"),
    ] {
        let student =
            Principal::new_member(name, email, section.id()).expect("valid member");
        roster
            .store_principal(&student)
            .await
            .expect("student stores");
        students.push(student);
    }

    Campus {
        task_desk: TaskDeskService::new(Arc::clone(&tasks), Arc::clone(&roster)),
        submission_desk: SubmissionDeskService::new(
            Arc::clone(&submissions),
            Arc::clone(&tasks),
            Arc::clone(&roster),
        ),
        membership: MembershipService::new(Arc::clone(&roster)),
        roster,
        tasks,
        submissions,
        section,
        super_admin,
        admin,
        pending_admin,
        students,
    }
}
