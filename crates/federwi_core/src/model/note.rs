//! Note domain model.
//!
//! Notes reference tasks by id only (`related_task_id`); the link is never
//! an ownership edge and may dangle after a task delete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ValidationError;

/// Note flavor: free-standing daily note or one attached to a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NoteKind {
    Daily,
    TaskRelated,
}

/// Canonical note record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// The calendar day this note belongs to.
    pub date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub kind: NoteKind,
    pub related_task_id: Option<Uuid>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub creation_timestamp: DateTime<Utc>,
    pub last_modified_timestamp: DateTime<Utc>,
}

impl Note {
    /// Creates a daily note dated today with a generated id.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: content.into(),
            date: now,
            kind: NoteKind::Daily,
            related_task_id: None,
            categories: Vec::new(),
            tags: Vec::new(),
            creation_timestamp: now,
            last_modified_timestamp: now,
        }
    }

    /// Creates a task-related note linked to `task_id`.
    pub fn for_task(task_id: Uuid, title: impl Into<String>, content: impl Into<String>) -> Self {
        let mut note = Self::new(title, content);
        note.kind = NoteKind::TaskRelated;
        note.related_task_id = Some(task_id);
        note
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.content.trim().is_empty() {
            return Err(ValidationError::EmptyContent);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Note, NoteKind};
    use crate::model::ValidationError;
    use uuid::Uuid;

    #[test]
    fn for_task_links_and_marks_kind() {
        let task_id = Uuid::new_v4();
        let note = Note::for_task(task_id, "standup", "blocked on review");
        assert_eq!(note.kind, NoteKind::TaskRelated);
        assert_eq!(note.related_task_id, Some(task_id));
    }

    #[test]
    fn validate_rejects_empty_content() {
        let note = Note::new("empty", " ");
        assert_eq!(note.validate(), Err(ValidationError::EmptyContent));
    }

    #[test]
    fn kind_serializes_as_type_with_kebab_case() {
        let note = Note::for_task(Uuid::new_v4(), "t", "c");
        let value = serde_json::to_value(&note).expect("note should serialize");
        assert_eq!(value["type"], "task-related");
        assert!(value.get("relatedTaskId").is_some());
    }
}
