//! Core domain logic for Federwi.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod context;
pub mod logging;
pub mod model;
pub mod service;
pub mod state;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use context::{AppContext, DefaultContext};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::daily_view::{DailyView, TaskBuckets};
pub use model::event::{Event, EventSource};
pub use model::note::{Note, NoteKind};
pub use model::task::{
    Category, CompletionStatus, Priority, RecurrenceKind, RecurringPattern, Task,
};
pub use model::ValidationError;
pub use service::calendar_service::CalendarService;
pub use service::daily_view::DailyViewService;
pub use service::note_service::NoteService;
pub use service::todo_service::{filter_todos, StatusFilter, TodoService};
pub use service::{ServiceError, ServiceResult};
pub use state::{AppState, StatePatch, StateStore, Subscription};
pub use store::fallback::FallbackStore;
pub use store::local::LocalStore;
pub use store::remote::RemoteStore;
pub use store::{Collection, Entity, Store, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
