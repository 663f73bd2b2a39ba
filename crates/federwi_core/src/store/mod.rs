//! Persistence gateway contracts and implementations.
//!
//! # Responsibility
//! - Define the uniform five-operation store contract shared by every
//!   collection (todos, notes, events).
//! - Isolate transport and on-device storage details from the services.
//!
//! # Invariants
//! - `create` assigns a fresh id iff the incoming id is nil.
//! - `update` shallow-merges the patch and stamps `lastModifiedTimestamp`;
//!   a missing id yields `Ok(None)`, never an error.
//! - `delete` is idempotent and always reports `true`.
//! - The fallback policy (remote first, then local) lives in one decorator
//!   so it can be tested in isolation.

use std::error::Error;
use std::fmt::{Display, Formatter};

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::task::Task;

pub mod fallback;
pub mod local;
pub mod remote;

/// One logical persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Todos,
    Notes,
    Events,
}

impl Collection {
    /// Resource path on the remote API.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Todos => "/todos",
            Self::Notes => "/notes",
            Self::Events => "/events",
        }
    }

    /// Namespaced key for the on-device store.
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Todos => "federwi_todos",
            Self::Notes => "federwi_notes",
            Self::Events => "federwi_events",
        }
    }
}

impl Display for Collection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.endpoint().trim_start_matches('/'))
    }
}

/// A persistable record with a stable id.
pub trait Entity: Serialize + DeserializeOwned + Clone {
    fn collection() -> Collection;
    fn id(&self) -> Uuid;
    fn assign_id(&mut self, id: Uuid);
}

impl Entity for Task {
    fn collection() -> Collection {
        Collection::Todos
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Entity for Note {
    fn collection() -> Collection {
        Collection::Notes
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

impl Entity for Event {
    fn collection() -> Collection {
        Collection::Events
    }
    fn id(&self) -> Uuid {
        self.id
    }
    fn assign_id(&mut self, id: Uuid) {
        self.id = id;
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence-layer failure.
///
/// `Transport` is recovered internally by the fallback decorator and only
/// surfaces when no local store is available to take over.
#[derive(Debug)]
pub enum StoreError {
    /// Remote call failed: network error or non-2xx status.
    Transport(String),
    /// On-device storage could not be read or written.
    Io(std::io::Error),
    /// A persisted record no longer matches the entity shape.
    InvalidRecord(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(message) => write!(f, "remote store unavailable: {message}"),
            Self::Io(err) => write!(f, "local store i/o failure: {err}"),
            Self::InvalidRecord(message) => write!(f, "invalid persisted record: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Uniform CRUD contract over one collection.
///
/// # Contract
/// - `get_by_id` returns `None` for an absent id.
/// - `update` returns `None` for an absent id (caller must check).
/// - `delete` reports success even when the id was absent.
pub trait Store<T: Entity> {
    fn get_all(&self) -> StoreResult<Vec<T>>;
    fn get_by_id(&self, id: Uuid) -> StoreResult<Option<T>>;
    fn create(&self, item: T) -> StoreResult<T>;
    fn update(&self, id: Uuid, patch: &serde_json::Value) -> StoreResult<Option<T>>;
    fn delete(&self, id: Uuid) -> StoreResult<bool>;
}
