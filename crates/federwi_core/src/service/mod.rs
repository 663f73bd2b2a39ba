//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into use-case level APIs for the three
//!   modules and the daily view.
//! - Keep callers decoupled from transport and storage details.
//!
//! # Invariants
//! - Services never bypass entity validation before a write.
//! - All calendar-day comparisons run in UTC, consistently, so rollover
//!   and filtering never disagree about what "the same day" means.

use std::error::Error;
use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::model::ValidationError;
use crate::store::StoreError;

pub mod calendar_service;
pub mod daily_view;
pub mod note_service;
pub mod todo_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level failure.
///
/// Everything here is recoverable; the caller handles it by showing a
/// message, never by aborting the process.
#[derive(Debug)]
pub enum ServiceError {
    /// Referenced entity is absent.
    NotFound(Uuid),
    /// Malformed input rejected at the boundary.
    Validation(ValidationError),
    /// Persistence failure that the fallback could not recover.
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "entity not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Whether `timestamp` falls on calendar day `day`, compared in UTC at day
/// granularity (time of day ignored).
pub fn same_utc_day(timestamp: DateTime<Utc>, day: NaiveDate) -> bool {
    timestamp.date_naive() == day
}

/// Inclusive UTC bounds of one calendar day: midnight to 23:59:59.
pub fn utc_day_bounds(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc();
    let end = day
        .and_hms_opt(23, 59, 59)
        .expect("23:59:59 is a valid time")
        .and_utc();
    (start, end)
}
