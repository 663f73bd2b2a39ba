//! Global in-memory application state.
//!
//! # Responsibility
//! - Hold the published state snapshot consumed by the presentation layer.
//! - Notify subscribers synchronously, in registration order, on every
//!   `set_state`.
//!
//! # Invariants
//! - `set_state` shallow-merges: only fields present in the patch replace
//!   their slice of the state.
//! - A panicking listener is isolated; later listeners still run.
//! - Notification is synchronous and re-entrant-unsafe: a listener calling
//!   `set_state` recurses and must bound its own recursion.
//! - Nothing here persists; lifetime is the process.

use std::cell::{Cell, RefCell};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::rc::Rc;

use log::error;
use uuid::Uuid;

use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::task::Task;

/// Published application state.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub todos: Vec<Task>,
    pub notes: Vec<Note>,
    pub events: Vec<Event>,
    pub categories: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Partial state update; absent fields leave the current slice untouched.
#[derive(Debug, Clone, Default)]
pub struct StatePatch {
    pub todos: Option<Vec<Task>>,
    pub notes: Option<Vec<Note>>,
    pub events: Option<Vec<Event>>,
    pub categories: Option<Vec<String>>,
    pub loading: Option<bool>,
    /// `Some(None)` clears the error slice.
    pub error: Option<Option<String>>,
}

type Listener = Rc<dyn Fn(&AppState)>;

/// Handle returned by `subscribe`; pass back to `unsubscribe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription {
    id: u64,
}

/// Single-threaded state container with subscriber notification.
#[derive(Default)]
pub struct StateStore {
    state: RefCell<AppState>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_id: Cell<u64>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a clone of the current state snapshot.
    pub fn get_state(&self) -> AppState {
        self.state.borrow().clone()
    }

    /// Registers a listener; listeners run in registration order.
    pub fn subscribe(&self, listener: impl Fn(&AppState) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::new(listener)));
        Subscription { id }
    }

    /// Removes a previously registered listener. Idempotent.
    pub fn unsubscribe(&self, subscription: Subscription) {
        self.listeners
            .borrow_mut()
            .retain(|(id, _)| *id != subscription.id);
    }

    /// Shallow-merges `patch` and synchronously notifies every listener
    /// with the new full state.
    pub fn set_state(&self, patch: StatePatch) {
        {
            let mut state = self.state.borrow_mut();
            if let Some(todos) = patch.todos {
                state.todos = todos;
            }
            if let Some(notes) = patch.notes {
                state.notes = notes;
            }
            if let Some(events) = patch.events {
                state.events = events;
            }
            if let Some(categories) = patch.categories {
                state.categories = categories;
            }
            if let Some(loading) = patch.loading {
                state.loading = loading;
            }
            if let Some(error) = patch.error {
                state.error = error;
            }
        }
        self.notify();
    }

    fn notify(&self) {
        // Snapshot state and listeners first so no RefCell borrow is held
        // while listeners run.
        let snapshot = self.get_state();
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            if catch_unwind(AssertUnwindSafe(|| listener(&snapshot))).is_err() {
                error!("event=listener_panic module=state status=isolated");
            }
        }
    }

    pub fn set_loading(&self, loading: bool) {
        self.set_state(StatePatch {
            loading: Some(loading),
            ..StatePatch::default()
        });
    }

    pub fn set_error(&self, error: Option<String>) {
        self.set_state(StatePatch {
            error: Some(error),
            ..StatePatch::default()
        });
    }

    pub fn set_todos(&self, todos: Vec<Task>) {
        self.set_state(StatePatch {
            todos: Some(todos),
            ..StatePatch::default()
        });
    }

    pub fn add_todo(&self, todo: Task) {
        let mut todos = self.state.borrow().todos.clone();
        todos.push(todo);
        self.set_todos(todos);
    }

    /// Applies `mutate` to the todo with `id`, if present, and republishes.
    pub fn update_todo(&self, id: Uuid, mutate: impl FnOnce(&mut Task)) {
        let mut todos = self.state.borrow().todos.clone();
        if let Some(todo) = todos.iter_mut().find(|todo| todo.id == id) {
            mutate(todo);
        }
        self.set_todos(todos);
    }

    pub fn remove_todo(&self, id: Uuid) {
        let mut todos = self.state.borrow().todos.clone();
        todos.retain(|todo| todo.id != id);
        self.set_todos(todos);
    }

    pub fn set_notes(&self, notes: Vec<Note>) {
        self.set_state(StatePatch {
            notes: Some(notes),
            ..StatePatch::default()
        });
    }

    pub fn add_note(&self, note: Note) {
        let mut notes = self.state.borrow().notes.clone();
        notes.push(note);
        self.set_notes(notes);
    }

    pub fn remove_note(&self, id: Uuid) {
        let mut notes = self.state.borrow().notes.clone();
        notes.retain(|note| note.id != id);
        self.set_notes(notes);
    }

    pub fn set_events(&self, events: Vec<Event>) {
        self.set_state(StatePatch {
            events: Some(events),
            ..StatePatch::default()
        });
    }

    pub fn add_event(&self, event: Event) {
        let mut events = self.state.borrow().events.clone();
        events.push(event);
        self.set_events(events);
    }

    pub fn remove_event(&self, id: Uuid) {
        let mut events = self.state.borrow().events.clone();
        events.retain(|event| event.id != id);
        self.set_events(events);
    }

    pub fn set_categories(&self, categories: Vec<String>) {
        self.set_state(StatePatch {
            categories: Some(categories),
            ..StatePatch::default()
        });
    }
}
