//! Organizational roster for Campanile.
//!
//! The roster tracks the department, batch, and section hierarchy plus the
//! principals assigned to it. It owns the role-mutation operations: a
//! section admin may promote or detach students within their own section,
//! and a super admin may change any principal's role or activate a pending
//! section admin. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
