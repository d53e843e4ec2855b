//! Live dashboard sessions for Campanile.
//!
//! This module keeps an open dashboard current. A session holds a cached
//! snapshot of the principal-visible tasks and submissions, re-fetches it
//! when the change feed reports writes to the task tables, and re-derives
//! per-task statuses on a countdown tick so that elapsed time alone flips
//! a task from pending to overdue. Refreshes triggered while one is in
//! flight are coalesced rather than queued. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The session controller in [`session`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod session;

#[cfg(test)]
mod tests;
