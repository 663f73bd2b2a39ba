//! Calendar event domain model.
//!
//! # Invariants
//! - `end_date_time` must not be earlier than `start_date_time`.
//! - `external_id` identifies the record in its source calendar; it is
//!   opaque to the core and only meaningful for non-manual sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ValidationError;

/// Where an event originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Google,
    Outlook,
    Apple,
    Caldav,
    Manual,
}

/// Canonical calendar event record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date_time: DateTime<Utc>,
    pub end_date_time: DateTime<Utc>,
    pub location: String,
    pub attendees: Vec<String>,
    pub source: EventSource,
    pub external_id: Option<String>,
    /// RFC 5545 RRULE text, passed through untouched.
    pub recurrence_rule: Option<String>,
    /// Reminder offsets in minutes before the start.
    pub alert_reminders: Vec<u32>,
    pub category: String,
    pub creation_timestamp: DateTime<Utc>,
    pub last_modified_timestamp: DateTime<Utc>,
}

impl Event {
    /// Creates a manual event spanning `start..end` with a generated id.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            start_date_time: start,
            end_date_time: end,
            location: String::new(),
            attendees: Vec::new(),
            source: EventSource::Manual,
            external_id: None,
            recurrence_rule: None,
            alert_reminders: Vec::new(),
            category: String::new(),
            creation_timestamp: now,
            last_modified_timestamp: now,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if self.end_date_time < self.start_date_time {
            return Err(ValidationError::EventEndsBeforeStart);
        }
        Ok(())
    }
}
