//! Explicit application context.
//!
//! # Responsibility
//! - Wire the three module services, their stores and the state store into
//!   one dependency object constructed once at process start.
//!
//! # Invariants
//! - No module-level singletons: tests construct isolated contexts over
//!   their own store implementations.

use chrono::NaiveDate;

use crate::config::CoreConfig;
use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::task::Task;
use crate::service::calendar_service::CalendarService;
use crate::service::daily_view::DailyViewService;
use crate::service::note_service::NoteService;
use crate::service::todo_service::TodoService;
use crate::service::ServiceResult;
use crate::state::{StatePatch, StateStore};
use crate::store::fallback::FallbackStore;
use crate::store::local::LocalStore;
use crate::store::remote::RemoteStore;
use crate::store::{Entity, Store};

/// Application context over arbitrary store implementations.
pub struct AppContext<TS, NS, ES>
where
    TS: Store<Task>,
    NS: Store<Note>,
    ES: Store<Event>,
{
    pub todos: TodoService<TS>,
    pub notes: NoteService<NS>,
    pub calendar: CalendarService<ES>,
    pub state: StateStore,
}

/// Context over the production remote-with-local-fallback stores.
pub type DefaultContext =
    AppContext<FallbackStore<Task>, FallbackStore<Note>, FallbackStore<Event>>;

impl DefaultContext {
    /// Builds the production context described by `config`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(
            fallback_store(config),
            fallback_store(config),
            fallback_store(config),
        )
    }
}

impl<TS, NS, ES> AppContext<TS, NS, ES>
where
    TS: Store<Task>,
    NS: Store<Note>,
    ES: Store<Event>,
{
    pub fn new(todo_store: TS, note_store: NS, event_store: ES) -> Self {
        Self {
            todos: TodoService::new(todo_store),
            notes: NoteService::new(note_store),
            calendar: CalendarService::new(event_store),
            state: StateStore::new(),
        }
    }

    /// Aggregator borrowing this context's services.
    pub fn daily_views(&self) -> DailyViewService<'_, TS, NS, ES> {
        DailyViewService::new(&self.todos, &self.notes, &self.calendar)
    }

    /// Convenience: builds the daily view for `day`.
    pub fn daily_view(&self, day: NaiveDate) -> ServiceResult<crate::model::daily_view::DailyView> {
        self.daily_views().daily_view(day)
    }

    /// Reloads all three collections into the state store.
    ///
    /// Publishes `loading = true` first; on failure publishes the error
    /// message and clears `loading` before returning it.
    pub fn refresh_state(&self) -> ServiceResult<()> {
        self.state.set_loading(true);

        let loaded = self
            .todos
            .all_todos()
            .and_then(|todos| Ok((todos, self.notes.all_notes()?)))
            .and_then(|(todos, notes)| Ok((todos, notes, self.calendar.all_events()?)));

        match loaded {
            Ok((todos, notes, events)) => {
                self.state.set_state(StatePatch {
                    todos: Some(todos),
                    notes: Some(notes),
                    events: Some(events),
                    loading: Some(false),
                    error: Some(None),
                    ..StatePatch::default()
                });
                Ok(())
            }
            Err(err) => {
                self.state.set_state(StatePatch {
                    loading: Some(false),
                    error: Some(Some(err.to_string())),
                    ..StatePatch::default()
                });
                Err(err)
            }
        }
    }
}

fn fallback_store<T: Entity>(config: &CoreConfig) -> FallbackStore<T> {
    let local = LocalStore::new(&config.data_dir);
    match &config.remote_base_url {
        Some(base_url) => FallbackStore::new(RemoteStore::new(base_url.clone()), local),
        None => FallbackStore::local_only(local),
    }
}
