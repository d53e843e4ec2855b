//! Task lifecycle management for Campanile.
//!
//! This module implements the coursework side of the engine: creating and
//! publishing tasks, recording student submissions through an upsert keyed
//! by `(task, user)`, and deriving the per-student task status that the
//! dashboards display. Status is always computed on read, never stored.
//! The module follows hexagonal architecture:
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
