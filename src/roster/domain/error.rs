//! Error types for roster domain validation and parsing.

use super::Role;
use thiserror::Error;

/// Errors returned while constructing roster domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RosterDomainError {
    /// An organizational unit name is empty after trimming.
    #[error("organizational unit name must not be empty")]
    EmptyUnitName,

    /// A principal name is empty after trimming.
    #[error("principal name must not be empty")]
    EmptyPrincipalName,

    /// A member or section admin was created without a section.
    #[error("a {} must belong to exactly one section", .0.as_str())]
    MissingSection(Role),
}

/// Error returned while parsing roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);
