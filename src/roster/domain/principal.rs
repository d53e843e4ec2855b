//! Principals and their roles.

use super::{ParseRoleError, RosterDomainError, SectionId, UserId};
use serde::{Deserialize, Serialize};

/// Closed set of roles a principal may hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Student receiving and submitting tasks.
    Member,
    /// Administrator of exactly one section.
    SectionAdmin,
    /// Unrestricted administrator across all organizational units.
    SuperAdmin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Member => "member",
            Self::SectionAdmin => "section_admin",
            Self::SuperAdmin => "super_admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "member" => Ok(Self::Member),
            "section_admin" => Ok(Self::SectionAdmin),
            "super_admin" => Ok(Self::SuperAdmin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// An authenticated actor with a role and optional section membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: UserId,
    name: String,
    email: String,
    role: Role,
    section: Option<SectionId>,
    student_number: Option<String>,
    active: bool,
}

/// Parameter object for reconstructing a persisted principal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedPrincipalData {
    /// Persisted identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// Persisted role.
    pub role: Role,
    /// Section membership, if any.
    pub section: Option<SectionId>,
    /// Institutional student number, if any.
    pub student_number: Option<String>,
    /// Whether the principal is active.
    pub active: bool,
}

impl Principal {
    /// Creates an active member of the given section.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyPrincipalName`] when the name is
    /// empty after trimming.
    pub fn new_member(
        name: impl Into<String>,
        email: impl Into<String>,
        section: SectionId,
    ) -> Result<Self, RosterDomainError> {
        Self::new(name, email, Role::Member, Some(section), true)
    }

    /// Creates a section admin in the pending-approval state.
    ///
    /// A pending admin has no effective capability until a super admin
    /// activates them.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyPrincipalName`] when the name is
    /// empty after trimming.
    pub fn new_pending_section_admin(
        name: impl Into<String>,
        email: impl Into<String>,
        section: SectionId,
    ) -> Result<Self, RosterDomainError> {
        Self::new(name, email, Role::SectionAdmin, Some(section), false)
    }

    /// Creates a super admin, who carries no section membership.
    ///
    /// # Errors
    ///
    /// Returns [`RosterDomainError::EmptyPrincipalName`] when the name is
    /// empty after trimming.
    pub fn new_super_admin(
        name: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, RosterDomainError> {
        Self::new(name, email, Role::SuperAdmin, None, true)
    }

    fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        section: Option<SectionId>,
        active: bool,
    ) -> Result<Self, RosterDomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(RosterDomainError::EmptyPrincipalName);
        }
        if section.is_none() && role != Role::SuperAdmin {
            return Err(RosterDomainError::MissingSection(role));
        }
        Ok(Self {
            id: UserId::new(),
            name: name.trim().to_owned(),
            email: email.into(),
            role,
            section,
            student_number: None,
            active,
        })
    }

    /// Reconstructs a principal from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPrincipalData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            email: data.email,
            role: data.role,
            section: data.section,
            student_number: data.student_number,
            active: data.active,
        }
    }

    /// Sets the institutional student number.
    #[must_use]
    pub fn with_student_number(mut self, student_number: impl Into<String>) -> Self {
        self.student_number = Some(student_number.into());
        self
    }

    /// Returns the principal identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the section membership, if any.
    #[must_use]
    pub const fn section(&self) -> Option<SectionId> {
        self.section
    }

    /// Returns the institutional student number, if any.
    #[must_use]
    pub fn student_number(&self) -> Option<&str> {
        self.student_number.as_deref()
    }

    /// Returns whether the principal is active.
    ///
    /// A section admin with `active == false` is pending approval and has
    /// no effective admin capability.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns whether the principal holds effective admin rights.
    #[must_use]
    pub const fn has_admin_rights(&self) -> bool {
        match self.role {
            Role::Member => false,
            Role::SectionAdmin => self.active,
            Role::SuperAdmin => true,
        }
    }

    /// Returns whether the principal administers the given section.
    ///
    /// Section membership is read from this instance; callers are expected
    /// to re-fetch the principal per request rather than hold one across
    /// requests, because a super admin can reassign the section.
    #[must_use]
    pub fn administers(&self, section: SectionId) -> bool {
        match self.role {
            Role::Member => false,
            Role::SectionAdmin => self.active && self.section == Some(section),
            Role::SuperAdmin => true,
        }
    }

    /// Changes the principal's role.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    /// Activates or deactivates the principal.
    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Detaches the principal from their section and deactivates them.
    pub const fn detach_from_section(&mut self) {
        self.section = None;
        self.active = false;
    }

    /// Reassigns the principal to another section.
    pub const fn assign_section(&mut self, section: SectionId) {
        self.section = Some(section);
    }
}
