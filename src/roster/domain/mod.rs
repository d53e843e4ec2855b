//! Domain model for the organizational roster.
//!
//! The roster domain models the department → batch → section hierarchy and
//! the principals attached to it while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod ids;
mod org;
mod principal;

pub use error::{ParseRoleError, RosterDomainError};
pub use ids::{BatchId, DepartmentId, SectionId, UserId};
pub use org::{Batch, Department, Section};
pub use principal::{PersistedPrincipalData, Principal, Role};
