//! Routine domain types.

use crate::roster::domain::{SectionId, UserId};
use chrono::{DateTime, NaiveTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a routine slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoutineId(Uuid);

impl RoutineId {
    /// Creates a new random routine identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a routine identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for RoutineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoutineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated day of week, 0 (Sunday) through 6 (Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOfWeek(u8);

impl DayOfWeek {
    /// Creates a validated day of week.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::InvalidDayOfWeek`] when the value
    /// exceeds 6.
    pub const fn new(value: u8) -> Result<Self, RoutineDomainError> {
        if value > 6 {
            return Err(RoutineDomainError::InvalidDayOfWeek(value));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Validated weekly time slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineSlot {
    day: DayOfWeek,
    start: NaiveTime,
    end: NaiveTime,
}

impl RoutineSlot {
    /// Creates a slot with a start strictly before its end.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptySlot`] when the start does not
    /// precede the end.
    pub fn new(
        day: DayOfWeek,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self, RoutineDomainError> {
        if start >= end {
            return Err(RoutineDomainError::EmptySlot);
        }
        Ok(Self { day, start, end })
    }

    /// Returns the day of week.
    #[must_use]
    pub const fn day(self) -> DayOfWeek {
        self.day
    }

    /// Returns the slot start time.
    #[must_use]
    pub const fn start(self) -> NaiveTime {
        self.start
    }

    /// Returns the slot end time.
    #[must_use]
    pub const fn end(self) -> NaiveTime {
        self.end
    }
}

/// A recurring weekly class slot scoped to a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Routine {
    id: RoutineId,
    title: String,
    section: SectionId,
    slot: RoutineSlot,
    room: Option<String>,
    subject: Option<String>,
    instructor: Option<String>,
    active: bool,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedRoutineData {
    /// Persisted identifier.
    pub id: RoutineId,
    /// Routine title.
    pub title: String,
    /// Owning section.
    pub section: SectionId,
    /// Weekly time slot.
    pub slot: RoutineSlot,
    /// Room, if any.
    pub room: Option<String>,
    /// Subject, if any.
    pub subject: Option<String>,
    /// Instructor name, if any.
    pub instructor: Option<String>,
    /// Soft-delete flag.
    pub active: bool,
    /// Creating principal.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    /// Creates an active routine.
    ///
    /// # Errors
    ///
    /// Returns [`RoutineDomainError::EmptyTitle`] when the title is empty
    /// after trimming.
    pub fn new(
        title: impl Into<String>,
        section: SectionId,
        slot: RoutineSlot,
        created_by: UserId,
        clock: &impl Clock,
    ) -> Result<Self, RoutineDomainError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(RoutineDomainError::EmptyTitle);
        }
        let timestamp = clock.utc();
        Ok(Self {
            id: RoutineId::new(),
            title: trimmed.to_owned(),
            section,
            slot,
            room: None,
            subject: None,
            instructor: None,
            active: true,
            created_by,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a routine from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedRoutineData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            section: data.section,
            slot: data.slot,
            room: data.room,
            subject: data.subject,
            instructor: data.instructor,
            active: data.active,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Sets the room.
    #[must_use]
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the instructor name.
    #[must_use]
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    /// Returns the routine identifier.
    #[must_use]
    pub const fn id(&self) -> RoutineId {
        self.id
    }

    /// Returns the routine title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the owning section.
    #[must_use]
    pub const fn section(&self) -> SectionId {
        self.section
    }

    /// Returns the weekly time slot.
    #[must_use]
    pub const fn slot(&self) -> RoutineSlot {
        self.slot
    }

    /// Returns the room, if any.
    #[must_use]
    pub fn room(&self) -> Option<&str> {
        self.room.as_deref()
    }

    /// Returns the subject, if any.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    /// Returns the instructor name, if any.
    #[must_use]
    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    /// Returns whether the routine is active (not soft-deleted).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creating principal.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Soft-deletes the routine; the row is kept for history.
    pub fn deactivate(&mut self, clock: &impl Clock) {
        self.active = false;
        self.updated_at = clock.utc();
    }
}

/// Errors returned while constructing routine domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RoutineDomainError {
    /// The routine title is empty after trimming.
    #[error("routine title must not be empty")]
    EmptyTitle,

    /// The day of week falls outside 0–6.
    #[error("day of week must be between 0 and 6, got {0}")]
    InvalidDayOfWeek(u8),

    /// The slot start does not precede its end.
    #[error("routine slot must start before it ends")]
    EmptySlot,
}
