//! Task domain model.
//!
//! # Responsibility
//! - Define the task record shared by the lifecycle engine and stores.
//! - Provide lifecycle helpers for the cyclic manual status toggle.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - For a task with a non-empty `subtasks` list the completion status is
//!   derived from the children; it must only be written by the derivation
//!   path in the lifecycle engine.
//! - `parent_task_id` and `subtasks` are weak id references, never an
//!   ownership edge; an orphaned child is a tolerated, logged anomaly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ValidationError;

/// Three-tier task categorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    ShortTerm,
    MediumTerm,
    LongTerm,
}

/// Task completion state.
///
/// Manual toggling cycles `Incomplete -> Partial -> Complete -> Incomplete`;
/// there is no absorbing state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionStatus {
    Incomplete,
    Partial,
    Complete,
}

impl CompletionStatus {
    /// Returns the next state in the manual toggle cycle.
    pub fn next(self) -> Self {
        match self {
            Self::Incomplete => Self::Partial,
            Self::Partial => Self::Complete,
            Self::Complete => Self::Incomplete,
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Normal,
    High,
}

/// Recurrence frequency for a recurring task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceKind {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

/// Recurrence rule value object, owned exclusively by its task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPattern {
    #[serde(rename = "type")]
    pub kind: RecurrenceKind,
    /// Every `interval` units of `kind`; must be >= 1.
    pub interval: u32,
    /// Subset of weekdays, Sunday = 0.
    pub days_of_week: Option<Vec<u8>>,
    pub day_of_month: Option<u8>,
    pub end_date: Option<DateTime<Utc>>,
    pub max_occurrences: Option<u32>,
}

impl RecurringPattern {
    /// Creates a pattern repeating every `interval` units of `kind`.
    pub fn new(kind: RecurrenceKind, interval: u32) -> Self {
        Self {
            kind,
            interval,
            days_of_week: None,
            day_of_month: None,
            end_date: None,
            max_occurrences: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.interval == 0 {
            return Err(ValidationError::BadRecurringInterval(self.interval));
        }
        if let Some(days) = &self.days_of_week {
            if let Some(&bad) = days.iter().find(|&&day| day > 6) {
                return Err(ValidationError::BadDayOfWeek(bad));
            }
        }
        if let Some(day) = self.day_of_month {
            if day == 0 || day > 31 {
                return Err(ValidationError::BadDayOfMonth(day));
            }
        }
        Ok(())
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub completion_status: CompletionStatus,
    pub due_date: Option<DateTime<Utc>>,
    pub priority_level: Priority,
    /// Weak back-reference to the parent task, if any.
    pub parent_task_id: Option<Uuid>,
    /// Ordered child ids, creation order.
    pub subtasks: Vec<Uuid>,
    /// The date the task was first filed under; preserved across rollovers.
    pub original_date: DateTime<Utc>,
    /// The date bucket the task is currently filed under.
    pub current_date: DateTime<Utc>,
    pub is_rolled_over: bool,
    pub is_recurring: bool,
    pub recurring_pattern: Option<RecurringPattern>,
    pub tags: Vec<String>,
    pub creation_timestamp: DateTime<Utc>,
    pub last_modified_timestamp: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a task with a generated id and documented defaults:
    /// incomplete, normal priority, filed under the current day.
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            category,
            completion_status: CompletionStatus::Incomplete,
            due_date: None,
            priority_level: Priority::Normal,
            parent_task_id: None,
            subtasks: Vec::new(),
            original_date: now,
            current_date: now,
            is_rolled_over: false,
            is_recurring: false,
            recurring_pattern: None,
            tags: Vec::new(),
            creation_timestamp: now,
            last_modified_timestamp: now,
            completed_at: None,
        }
    }

    /// Validates required fields and the owned recurrence rule.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if let Some(pattern) = &self.recurring_pattern {
            pattern.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Category, CompletionStatus, RecurrenceKind, RecurringPattern, Task};
    use crate::model::ValidationError;

    #[test]
    fn new_task_applies_documented_defaults() {
        let task = Task::new("write report", Category::ShortTerm);
        assert_eq!(task.completion_status, CompletionStatus::Incomplete);
        assert_eq!(task.priority_level, super::Priority::Normal);
        assert!(task.subtasks.is_empty());
        assert!(task.parent_task_id.is_none());
        assert!(!task.is_rolled_over);
        assert!(task.completed_at.is_none());
        assert_eq!(task.original_date, task.current_date);
    }

    #[test]
    fn status_toggle_cycles_back_after_three_steps() {
        let start = CompletionStatus::Incomplete;
        assert_eq!(start.next(), CompletionStatus::Partial);
        assert_eq!(start.next().next(), CompletionStatus::Complete);
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn validate_rejects_blank_title() {
        let task = Task::new("   ", Category::LongTerm);
        assert_eq!(task.validate(), Err(ValidationError::EmptyTitle));
    }

    #[test]
    fn validate_rejects_zero_recurring_interval() {
        let mut task = Task::new("water plants", Category::ShortTerm);
        task.is_recurring = true;
        task.recurring_pattern = Some(RecurringPattern::new(RecurrenceKind::Daily, 0));
        assert_eq!(
            task.validate(),
            Err(ValidationError::BadRecurringInterval(0))
        );
    }

    #[test]
    fn validate_rejects_out_of_range_weekday() {
        let mut pattern = RecurringPattern::new(RecurrenceKind::Weekly, 1);
        pattern.days_of_week = Some(vec![1, 7]);
        assert_eq!(pattern.validate(), Err(ValidationError::BadDayOfWeek(7)));
    }

    #[test]
    fn wire_format_uses_camel_case_and_kebab_category() {
        let task = Task::new("ship v2", Category::MediumTerm);
        let value = serde_json::to_value(&task).expect("task should serialize");
        let object = value.as_object().expect("task serializes to an object");
        assert_eq!(object["category"], "medium-term");
        assert_eq!(object["completionStatus"], "incomplete");
        assert!(object.contains_key("parentTaskId"));
        assert!(object.contains_key("lastModifiedTimestamp"));
    }
}
