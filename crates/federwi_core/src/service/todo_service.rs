//! Task lifecycle engine.
//!
//! # Responsibility
//! - Enforce every task state-machine rule: manual status transitions,
//!   parent status derivation, date-based rollover and the pure
//!   category/status filters.
//!
//! # Invariants
//! - A parent's completion status is derived from its children whenever a
//!   child status changes; a parent with zero subtasks is left untouched.
//! - `completed_at` is set exactly when a task enters `Complete` and
//!   cleared on any other transition.
//! - Rollover never mutates the original task's status or id; the original
//!   stays in its day bucket flagged `is_rolled_over`.
//! - Subtask creation performs two non-transactional writes; a failed
//!   parent update leaves an orphaned child (tolerated, logged).

use chrono::{Days, NaiveDate, Utc};
use log::{info, warn};
use serde_json::json;
use std::collections::HashSet;
use uuid::Uuid;

use crate::model::task::{Category, CompletionStatus, Task};
use crate::service::{same_utc_day, ServiceError, ServiceResult};
use crate::store::Store;

/// Completion-status filter for todo queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Everything not yet complete (incomplete or partial).
    Active,
    /// Only completed tasks.
    Completed,
}

impl StatusFilter {
    fn matches(self, status: CompletionStatus) -> bool {
        match self {
            Self::All => true,
            Self::Active => status != CompletionStatus::Complete,
            Self::Completed => status == CompletionStatus::Complete,
        }
    }
}

/// Pure composed filter: category exact-match first, then status.
///
/// The two predicates are independent, so the result has set-intersection
/// semantics regardless of application order.
pub fn filter_todos(
    todos: &[Task],
    category: Option<Category>,
    filter: StatusFilter,
) -> Vec<Task> {
    todos
        .iter()
        .filter(|todo| category.map_or(true, |wanted| todo.category == wanted))
        .filter(|todo| filter.matches(todo.completion_status))
        .cloned()
        .collect()
}

/// Use-case service enforcing the task state machine.
pub struct TodoService<S: Store<Task>> {
    store: S,
}

impl<S: Store<Task>> TodoService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates and persists a new task.
    pub fn create_todo(&self, task: Task) -> ServiceResult<Task> {
        task.validate()?;
        Ok(self.store.create(task)?)
    }

    /// Gets one task by id; `None` when absent.
    pub fn get_todo(&self, id: Uuid) -> ServiceResult<Option<Task>> {
        Ok(self.store.get_by_id(id)?)
    }

    pub fn all_todos(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.store.get_all()?)
    }

    /// Hard-removes a task. Idempotent; dangling parent/child references
    /// are tolerated and surface as logged anomalies on later derivations.
    pub fn delete_todo(&self, id: Uuid) -> ServiceResult<bool> {
        Ok(self.store.delete(id)?)
    }

    /// Tasks whose `current_date` bucket falls on `day`, in store order.
    pub fn todos_for_date(&self, day: NaiveDate) -> ServiceResult<Vec<Task>> {
        let todos = self.store.get_all()?;
        Ok(todos
            .into_iter()
            .filter(|todo| same_utc_day(todo.current_date, day))
            .collect())
    }

    pub fn todos_by_category(&self, category: Category) -> ServiceResult<Vec<Task>> {
        let todos = self.store.get_all()?;
        Ok(filter_todos(&todos, Some(category), StatusFilter::All))
    }

    pub fn todos_by_status(&self, filter: StatusFilter) -> ServiceResult<Vec<Task>> {
        let todos = self.store.get_all()?;
        Ok(filter_todos(&todos, None, filter))
    }

    /// Sets a task's completion status and refreshes derived state.
    ///
    /// # Contract
    /// - Fails with `NotFound` when the task does not exist.
    /// - `completed_at` becomes now iff `status` is `Complete`.
    /// - When the task has a parent, ancestor statuses are re-derived
    ///   before this returns, so subsequent reads observe the side effect.
    pub fn update_task_status(
        &self,
        id: Uuid,
        status: CompletionStatus,
    ) -> ServiceResult<Task> {
        let task = self
            .store
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound(id))?;

        let completed_at = (status == CompletionStatus::Complete).then(Utc::now);
        let patch = json!({
            "completionStatus": status,
            "completedAt": completed_at,
        });

        let updated = self
            .store
            .update(id, &patch)?
            .ok_or(ServiceError::NotFound(id))?;

        if let Some(parent_id) = task.parent_task_id {
            self.derive_ancestor_statuses(parent_id)?;
        }

        Ok(updated)
    }

    /// Advances a task one step along the manual toggle cycle
    /// (incomplete -> partial -> complete -> incomplete).
    pub fn toggle_task_status(&self, id: Uuid) -> ServiceResult<Task> {
        let task = self
            .store
            .get_by_id(id)?
            .ok_or(ServiceError::NotFound(id))?;
        self.update_task_status(id, task.completion_status.next())
    }

    /// Creates a child task and appends its id to the parent's ordered
    /// subtask list.
    ///
    /// The two writes are not transactional: if the parent update fails the
    /// child remains as an orphan rather than being rolled back.
    pub fn add_subtask(&self, parent_id: Uuid, mut subtask: Task) -> ServiceResult<Task> {
        let parent = self
            .store
            .get_by_id(parent_id)?
            .ok_or(ServiceError::NotFound(parent_id))?;

        subtask.parent_task_id = Some(parent_id);
        subtask.validate()?;
        let created = self.store.create(subtask)?;

        let mut subtask_ids = parent.subtasks;
        subtask_ids.push(created.id);
        self.store
            .update(parent_id, &json!({ "subtasks": subtask_ids }))?;

        Ok(created)
    }

    /// Rolls incomplete and partial tasks from one day bucket to another.
    ///
    /// # Contract
    /// - Originals keep their id and status; they are flagged
    ///   `is_rolled_over = true` and stay in the `from` bucket as history.
    /// - Each clone gets a fresh id, `current_date = to`, the preserved
    ///   `original_date` and `is_rolled_over = false`.
    /// - Already-flagged originals are skipped, so a second pass over the
    ///   same `from` day does not duplicate them.
    /// - Subtasks are not recursed into; one filed under `from` and still
    ///   open rolls over independently, and the parent/child link is not
    ///   re-validated afterwards.
    /// - Returns the clones in the order the originals were fetched.
    pub fn rollover_incomplete_tasks(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> ServiceResult<Vec<Task>> {
        let candidates = self.todos_for_date(from)?;
        let mut rolled = Vec::new();

        for task in candidates {
            let open = matches!(
                task.completion_status,
                CompletionStatus::Incomplete | CompletionStatus::Partial
            );
            if !open || task.is_rolled_over {
                continue;
            }

            self.store
                .update(task.id, &json!({ "isRolledOver": true }))?;

            let mut clone = task.clone();
            clone.id = Uuid::nil();
            clone.current_date = to
                .and_hms_opt(0, 0, 0)
                .expect("midnight is a valid time")
                .and_utc();
            clone.is_rolled_over = false;
            rolled.push(self.store.create(clone)?);
        }

        info!(
            "event=rollover module=todo status=ok from={from} to={to} count={}",
            rolled.len()
        );
        Ok(rolled)
    }

    /// Rolls open tasks from `day` into the following day.
    pub fn rollover_to_next_day(&self, day: NaiveDate) -> ServiceResult<Vec<Task>> {
        let next = day
            .checked_add_days(Days::new(1))
            .expect("next calendar day exists");
        self.rollover_incomplete_tasks(day, next)
    }

    /// Re-derives completion status for `parent_id` and every ancestor
    /// above it, one level at a time up to the root.
    ///
    /// # Contract
    /// - A parent with an empty subtask list is left untouched.
    /// - Missing subtasks or a missing ancestor are logged and skipped,
    ///   not fatal (orphan anomaly).
    /// - A cyclic parent link is logged and breaks the walk.
    fn derive_ancestor_statuses(&self, parent_id: Uuid) -> ServiceResult<()> {
        let mut next = Some(parent_id);
        let mut seen = HashSet::new();

        while let Some(current) = next {
            if !seen.insert(current) {
                warn!(
                    "event=derive_status module=todo status=aborted cause=cycle task={current}"
                );
                break;
            }

            let Some(parent) = self.store.get_by_id(current)? else {
                warn!(
                    "event=derive_status module=todo status=skipped cause=missing_parent task={current}"
                );
                break;
            };

            if parent.subtasks.is_empty() {
                break;
            }

            let mut total = 0usize;
            let mut completed = 0usize;
            for subtask_id in &parent.subtasks {
                match self.store.get_by_id(*subtask_id)? {
                    Some(subtask) => {
                        total += 1;
                        if subtask.completion_status == CompletionStatus::Complete {
                            completed += 1;
                        }
                    }
                    None => warn!(
                        "event=derive_status module=todo status=skipped cause=missing_subtask parent={current} subtask={subtask_id}"
                    ),
                }
            }

            if total == 0 {
                break;
            }

            let derived = if completed == total {
                CompletionStatus::Complete
            } else if completed > 0 {
                CompletionStatus::Partial
            } else {
                CompletionStatus::Incomplete
            };

            let completed_at = (derived == CompletionStatus::Complete).then(Utc::now);
            self.store.update(
                current,
                &json!({
                    "completionStatus": derived,
                    "completedAt": completed_at,
                }),
            )?;

            next = parent.parent_task_id;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{filter_todos, StatusFilter};
    use crate::model::task::{Category, CompletionStatus, Task};

    fn task(category: Category, status: CompletionStatus) -> Task {
        let mut task = Task::new("t", category);
        task.completion_status = status;
        task
    }

    #[test]
    fn composed_filter_has_intersection_semantics() {
        let todos = vec![
            task(Category::ShortTerm, CompletionStatus::Incomplete),
            task(Category::ShortTerm, CompletionStatus::Partial),
            task(Category::ShortTerm, CompletionStatus::Complete),
            task(Category::LongTerm, CompletionStatus::Incomplete),
        ];

        let active_short =
            filter_todos(&todos, Some(Category::ShortTerm), StatusFilter::Active);
        assert_eq!(active_short.len(), 2);
        assert!(active_short.iter().all(|todo| {
            todo.category == Category::ShortTerm
                && todo.completion_status != CompletionStatus::Complete
        }));
    }

    #[test]
    fn all_filter_keeps_everything() {
        let todos = vec![
            task(Category::MediumTerm, CompletionStatus::Complete),
            task(Category::LongTerm, CompletionStatus::Incomplete),
        ];
        assert_eq!(filter_todos(&todos, None, StatusFilter::All).len(), 2);
    }

    #[test]
    fn completed_filter_selects_only_complete() {
        let todos = vec![
            task(Category::ShortTerm, CompletionStatus::Partial),
            task(Category::ShortTerm, CompletionStatus::Complete),
        ];
        let completed = filter_todos(&todos, None, StatusFilter::Completed);
        assert_eq!(completed.len(), 1);
        assert_eq!(
            completed[0].completion_status,
            CompletionStatus::Complete
        );
    }
}
