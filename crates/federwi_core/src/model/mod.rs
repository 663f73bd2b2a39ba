//! Canonical domain models for the three collaborating modules.
//!
//! # Responsibility
//! - Define the persisted shapes for tasks, notes and calendar events.
//! - Apply documented default values in constructors instead of ad-hoc
//!   call-site defaulting.
//! - Validate required fields at the boundary via `validate()`.
//!
//! # Invariants
//! - Every persisted entity is identified by a stable `Uuid`.
//! - Wire names are camelCase and stable across local and remote storage.
//! - Deletion is a hard remove; there are no tombstones.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod daily_view;
pub mod event;
pub mod note;
pub mod task;

/// Malformed entity input detected at a create/update boundary.
///
/// Recoverable: surfaced to the caller, never fatal to the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Title is required but empty or whitespace-only.
    EmptyTitle,
    /// Note content is required but empty.
    EmptyContent,
    /// Recurring interval must be a positive integer.
    BadRecurringInterval(u32),
    /// Day-of-week entries must be in `0..=6` (Sunday = 0).
    BadDayOfWeek(u8),
    /// Day-of-month must be in `1..=31`.
    BadDayOfMonth(u8),
    /// Event end must not be earlier than its start.
    EventEndsBeforeStart,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "title must not be empty"),
            Self::EmptyContent => write!(f, "content must not be empty"),
            Self::BadRecurringInterval(value) => {
                write!(f, "recurring interval must be >= 1, got {value}")
            }
            Self::BadDayOfWeek(value) => {
                write!(f, "day of week must be in 0..=6, got {value}")
            }
            Self::BadDayOfMonth(value) => {
                write!(f, "day of month must be in 1..=31, got {value}")
            }
            Self::EventEndsBeforeStart => {
                write!(f, "event end must not be earlier than its start")
            }
        }
    }
}

impl Error for ValidationError {}
