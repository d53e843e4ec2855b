//! Department, batch, and section hierarchy nodes.

use super::{BatchId, DepartmentId, RosterDomainError, SectionId};
use serde::{Deserialize, Serialize};

fn validated_name(raw: impl Into<String>) -> Result<String, RosterDomainError> {
    let raw = raw.into();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RosterDomainError::EmptyUnitName);
    }
    Ok(trimmed.to_owned())
}

/// Top-level organizational unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    id: DepartmentId,
    name: String,
    code: String,
}

impl Department {
    /// Creates a department with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyUnitName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Result<Self, RosterDomainError> {
        Ok(Self {
            id: DepartmentId::new(),
            name: validated_name(name)?,
            code: code.into(),
        })
    }

    /// Returns the department identifier.
    #[must_use]
    pub const fn id(&self) -> DepartmentId {
        self.id
    }

    /// Returns the department name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the short department code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// Intake year grouping within a department.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    id: BatchId,
    name: String,
    department: DepartmentId,
}

impl Batch {
    /// Creates a batch belonging to the given department.
    ///
    /// The department reference is validated against the roster when the
    /// batch is stored; an unresolved parent is rejected there.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyUnitName`] when the name is empty
    /// after trimming.
    pub fn new(
        name: impl Into<String>,
        department: DepartmentId,
    ) -> Result<Self, RosterDomainError> {
        Ok(Self {
            id: BatchId::new(),
            name: validated_name(name)?,
            department,
        })
    }

    /// Returns the batch identifier.
    #[must_use]
    pub const fn id(&self) -> BatchId {
        self.id
    }

    /// Returns the batch name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning department.
    #[must_use]
    pub const fn department(&self) -> DepartmentId {
        self.department
    }
}

/// Unit of task and routine scoping.
///
/// A section's effective department is its batch's department; the roster
/// resolves that transitively rather than storing a duplicate reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    name: String,
    batch: BatchId,
}

impl Section {
    /// Creates a section belonging to the given batch.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyUnitName`] when the name is empty
    /// after trimming.
    pub fn new(name: impl Into<String>, batch: BatchId) -> Result<Self, RosterDomainError> {
        Ok(Self {
            id: SectionId::new(),
            name: validated_name(name)?,
            batch,
        })
    }

    /// Returns the section identifier.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns the section name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the owning batch.
    #[must_use]
    pub const fn batch(&self) -> BatchId {
        self.batch
    }
}
