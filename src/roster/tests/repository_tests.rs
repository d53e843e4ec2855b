//! In-memory roster repository tests covering hierarchy resolution.

use crate::roster::{
    adapters::memory::InMemoryRosterRepository,
    domain::{Batch, BatchId, Department, Principal, Section, SectionId},
    ports::{RosterRepository, RosterRepositoryError},
};
use rstest::{fixture, rstest};

#[fixture]
fn roster() -> InMemoryRosterRepository {
    InMemoryRosterRepository::new()
}

async fn seed_section(roster: &InMemoryRosterRepository) -> Section {
    let department = Department::new("Computer Science", "CSE").expect("valid department");
    roster
        .store_department(&department)
        .await
        .expect("department stores");
    let batch = Batch::new("Batch 58", department.id()).expect("valid batch");
    roster.store_batch(&batch).await.expect("batch stores");
    let section = Section::new("Section A", batch.id()).expect("valid section");
    roster.store_section(&section).await.expect("section stores");
    section
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn batch_requires_known_department(roster: InMemoryRosterRepository) {
    let batch = Batch::new("Batch 58", crate::roster::domain::DepartmentId::new())
        .expect("valid batch");
    let result = roster.store_batch(&batch).await;
    assert!(matches!(
        result,
        Err(RosterRepositoryError::UnknownDepartment(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn section_requires_known_batch(roster: InMemoryRosterRepository) {
    let section = Section::new("Section A", BatchId::new()).expect("valid section");
    let result = roster.store_section(&section).await;
    assert!(matches!(result, Err(RosterRepositoryError::UnknownBatch(_))));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn principal_requires_known_section(roster: InMemoryRosterRepository) {
    let member = Principal::new_member("Anika Rahman", "anika@example.edu", SectionId::new())
        .expect("valid member");
    let result = roster.store_principal(&member).await;
    assert!(matches!(
        result,
        Err(RosterRepositoryError::UnknownSection(_))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn section_students_excludes_admins_and_inactive_members(roster: InMemoryRosterRepository) {
    let section = seed_section(&roster).await;

    let student = Principal::new_member("Anika Rahman", "anika@example.edu", section.id())
        .expect("valid member");
    roster.store_principal(&student).await.expect("student stores");

    let mut dropped = Principal::new_member("Tanvir Hasan", "tanvir@example.edu", section.id())
        .expect("valid member");
    dropped.set_active(false);
    roster.store_principal(&dropped).await.expect("dropped stores");

    let admin =
        Principal::new_pending_section_admin("Rafiq Islam", "rafiq@example.edu", section.id())
            .expect("valid admin");
    roster.store_principal(&admin).await.expect("admin stores");

    let students = roster
        .list_section_students(section.id())
        .await
        .expect("listing succeeds");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0].id(), student.id());

    let everyone = roster
        .list_section_principals(section.id())
        .await
        .expect("listing succeeds");
    assert_eq!(everyone.len(), 3);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn effective_department_resolves_through_batch(roster: InMemoryRosterRepository) {
    let section = seed_section(&roster).await;
    let department = roster
        .effective_department(section.id())
        .await
        .expect("hierarchy resolves");
    assert_eq!(department.code(), "CSE");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn effective_department_reports_broken_link(roster: InMemoryRosterRepository) {
    let result = roster.effective_department(SectionId::new()).await;
    assert!(matches!(
        result,
        Err(RosterRepositoryError::UnknownSection(_))
    ));
}
