//! Daily view read model.
//!
//! Derived, never persisted: the aggregator rebuilds it on demand and no
//! code path mutates backing data through it.

use chrono::NaiveDate;
use serde::Serialize;

use crate::model::event::Event;
use crate::model::note::Note;
use crate::model::task::Task;

/// Tasks for one day partitioned into the three category tiers.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskBuckets {
    pub short_term: Vec<Task>,
    pub medium_term: Vec<Task>,
    pub long_term: Vec<Task>,
}

/// Immutable snapshot of one calendar day across all three modules.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyView {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub tasks: TaskBuckets,
    pub calendar_events: Vec<Event>,
    pub notes: Vec<Note>,
    /// Subset of the day's tasks with status `Complete`.
    pub completed_tasks: Vec<Task>,
}
