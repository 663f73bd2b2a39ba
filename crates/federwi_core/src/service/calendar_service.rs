//! Calendar event use-case service.
//!
//! # Invariants
//! - Range queries use overlap semantics: an event matches when it starts
//!   in the range, ends in the range, or spans it entirely.

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::model::event::Event;
use crate::service::{utc_day_bounds, ServiceResult};
use crate::store::Store;

/// Calendar service facade over a store implementation.
pub struct CalendarService<S: Store<Event>> {
    store: S,
}

impl<S: Store<Event>> CalendarService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new event.
    pub fn create_event(&self, event: Event) -> ServiceResult<Event> {
        event.validate()?;
        Ok(self.store.create(event)?)
    }

    pub fn get_event(&self, id: Uuid) -> ServiceResult<Option<Event>> {
        Ok(self.store.get_by_id(id)?)
    }

    pub fn all_events(&self) -> ServiceResult<Vec<Event>> {
        Ok(self.store.get_all()?)
    }

    pub fn delete_event(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.store.delete(id)?)
    }

    /// Events overlapping the inclusive `start..=end` range.
    pub fn events_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ServiceResult<Vec<Event>> {
        let events = self.store.get_all()?;
        Ok(events
            .into_iter()
            .filter(|event| {
                let starts_inside =
                    event.start_date_time >= start && event.start_date_time <= end;
                let ends_inside = event.end_date_time >= start && event.end_date_time <= end;
                let spans = event.start_date_time <= start && event.end_date_time >= end;
                starts_inside || ends_inside || spans
            })
            .collect())
    }

    /// Events touching calendar day `day` (UTC).
    pub fn events_for_day(&self, day: NaiveDate) -> ServiceResult<Vec<Event>> {
        let (start, end) = utc_day_bounds(day);
        self.events_by_date_range(start, end)
    }
}
