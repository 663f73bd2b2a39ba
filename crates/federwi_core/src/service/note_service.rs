//! Note use-case service.
//!
//! Only the queries the daily view and the task engine lean on: day-bucket
//! lookup, task-related notes and a simple substring search.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::model::note::Note;
use crate::service::{same_utc_day, ServiceResult};
use crate::store::Store;

/// Note service facade over a store implementation.
pub struct NoteService<S: Store<Note>> {
    store: S,
}

impl<S: Store<Note>> NoteService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new note.
    pub fn create_note(&self, note: Note) -> ServiceResult<Note> {
        note.validate()?;
        Ok(self.store.create(note)?)
    }

    pub fn get_note(&self, id: Uuid) -> ServiceResult<Option<Note>> {
        Ok(self.store.get_by_id(id)?)
    }

    pub fn all_notes(&self) -> ServiceResult<Vec<Note>> {
        Ok(self.store.get_all()?)
    }

    pub fn delete_note(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.store.delete(id)?)
    }

    /// Notes dated on `day`, in store order.
    pub fn notes_for_date(&self, day: NaiveDate) -> ServiceResult<Vec<Note>> {
        let notes = self.store.get_all()?;
        Ok(notes
            .into_iter()
            .filter(|note| same_utc_day(note.date, day))
            .collect())
    }

    /// Notes whose `related_task_id` references `task_id`.
    pub fn notes_for_task(&self, task_id: Uuid) -> ServiceResult<Vec<Note>> {
        let notes = self.store.get_all()?;
        Ok(notes
            .into_iter()
            .filter(|note| note.related_task_id == Some(task_id))
            .collect())
    }

    /// Notes tagged with `category`.
    pub fn notes_by_category(&self, category: &str) -> ServiceResult<Vec<Note>> {
        let notes = self.store.get_all()?;
        Ok(notes
            .into_iter()
            .filter(|note| note.categories.iter().any(|entry| entry == category))
            .collect())
    }

    /// Case-insensitive substring match over title and content.
    pub fn search_notes(&self, query: &str) -> ServiceResult<Vec<Note>> {
        let needle = query.to_lowercase();
        let notes = self.store.get_all()?;
        Ok(notes
            .into_iter()
            .filter(|note| {
                note.title.to_lowercase().contains(&needle)
                    || note.content.to_lowercase().contains(&needle)
            })
            .collect())
    }
}
