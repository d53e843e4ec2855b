//! Campanile: academic task lifecycle and visibility engine.
//!
//! This crate provides the core logic behind a university task-tracking
//! application: deriving per-student task status from publication, due
//! dates, and submission records; scoping what each role may see or
//! change; aggregating section statistics; and keeping open dashboards
//! current as the underlying data changes.
//!
//! # Architecture
//!
//! Campanile follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (entity store, feeds)
//!
//! # Modules
//!
//! - [`roster`]: Organizational hierarchy, principals, and role mutations
//! - [`task`]: Tasks, submissions, and per-user status derivation
//! - [`routine`]: Recurring weekly schedule slots with soft deletion
//! - [`scope`]: Role-based visibility and mutation predicates
//! - [`analytics`]: Pure reducers over task and submission snapshots
//! - [`live`]: Change-feed driven dashboard sessions

pub mod analytics;
pub mod live;
pub mod roster;
pub mod routine;
pub mod scope;
pub mod task;
