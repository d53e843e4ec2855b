//! Recurring weekly schedule slots.
//!
//! Routines are scoped to a section and soft-deleted rather than removed,
//! preserving historical schedule data. The context is small enough to
//! keep its domain, port, adapter, and service in flat modules.

mod domain;
mod memory;
mod ports;
mod service;

pub use domain::{
    DayOfWeek, PersistedRoutineData, Routine, RoutineDomainError, RoutineId, RoutineSlot,
};
pub use memory::InMemoryRoutineRepository;
pub use ports::{RoutineRepository, RoutineRepositoryError, RoutineRepositoryResult};
pub use service::{RoutineDeskError, RoutineDeskResult, RoutineDeskService};
