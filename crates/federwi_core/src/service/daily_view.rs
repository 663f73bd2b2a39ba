//! Daily view aggregator.
//!
//! # Responsibility
//! - Compose tasks, notes and events for one calendar day into a single
//!   immutable read model.
//!
//! # Invariants
//! - Aggregation never mutates backing data; `rollover_to_next_day` is the
//!   only method with side effects and delegates them to the task engine.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::model::daily_view::{DailyView, TaskBuckets};
use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::task::{Category, CompletionStatus, Task};
use crate::service::calendar_service::CalendarService;
use crate::service::note_service::NoteService;
use crate::service::todo_service::TodoService;
use crate::service::ServiceResult;
use crate::store::Store;

/// Aggregator borrowing the three module services.
pub struct DailyViewService<'a, TS, NS, ES>
where
    TS: Store<Task>,
    NS: Store<Note>,
    ES: Store<Event>,
{
    todos: &'a TodoService<TS>,
    notes: &'a NoteService<NS>,
    calendar: &'a CalendarService<ES>,
}

impl<'a, TS, NS, ES> DailyViewService<'a, TS, NS, ES>
where
    TS: Store<Task>,
    NS: Store<Note>,
    ES: Store<Event>,
{
    pub fn new(
        todos: &'a TodoService<TS>,
        notes: &'a NoteService<NS>,
        calendar: &'a CalendarService<ES>,
    ) -> Self {
        Self {
            todos,
            notes,
            calendar,
        }
    }

    /// Builds the read model for one calendar day.
    pub fn daily_view(&self, day: NaiveDate) -> ServiceResult<DailyView> {
        let day_tasks = self.todos.todos_for_date(day)?;

        let mut buckets = TaskBuckets::default();
        let mut completed_tasks = Vec::new();
        for task in day_tasks {
            if task.completion_status == CompletionStatus::Complete {
                completed_tasks.push(task.clone());
            }
            match task.category {
                Category::ShortTerm => buckets.short_term.push(task),
                Category::MediumTerm => buckets.medium_term.push(task),
                Category::LongTerm => buckets.long_term.push(task),
            }
        }

        Ok(DailyView {
            date: day,
            is_weekend: matches!(day.weekday(), Weekday::Sat | Weekday::Sun),
            tasks: buckets,
            calendar_events: self.calendar.events_for_day(day)?,
            notes: self.notes.notes_for_date(day)?,
            completed_tasks,
        })
    }

    /// Rolls open tasks from `day` forward, then returns the next day's
    /// freshly built view.
    pub fn rollover_to_next_day(&self, day: NaiveDate) -> ServiceResult<DailyView> {
        let next = day
            .checked_add_days(Days::new(1))
            .expect("next calendar day exists");
        self.todos.rollover_incomplete_tasks(day, next)?;
        self.daily_view(next)
    }
}
