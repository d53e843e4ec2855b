//! Port contracts for the organizational roster.
//!
//! Ports define infrastructure-agnostic interfaces used by roster services.

pub mod repository;

pub use repository::{RosterRepository, RosterRepositoryError, RosterRepositoryResult};
