// src/entity/note.rs
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::{new_note_id, today, NoteDraft};

/// A single checklist entry. Display order is the order in the containing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    #[serde(default)]
    pub done: bool,
}

impl ChecklistItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// A persisted note.
///
/// Field order matches the on-disk layout so an untouched file survives a
/// load/save cycle unchanged. Absent and `null` fields are defaulted during
/// deserialization; fields this crate does not know about are kept in
/// `extra` and written back as they were.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Legacy records may lack an id until they are backfilled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default = "today", deserialize_with = "null_as_today")]
    pub date: NaiveDate,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_today<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<NaiveDate>::deserialize(deserializer)?.unwrap_or_else(today))
}

impl Note {
    /// Build a note from caller-supplied fields.
    ///
    /// `position` is the 1-based slot the note occupies in the collection and
    /// only feeds the "Note N" placeholder used when the title is blank.
    pub fn from_draft(id: String, draft: NoteDraft, position: usize) -> Self {
        let title = draft
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| format!("Note {}", position));

        Self {
            id: Some(id),
            title,
            content: draft.content.unwrap_or_default(),
            tags: draft.tags,
            checklist: draft.checklist,
            date: draft.date.unwrap_or_else(today),
            extra: Map::new(),
        }
    }

    /// Create a note with a freshly generated id.
    pub fn create(draft: NoteDraft, position: usize) -> Self {
        Self::from_draft(new_note_id(), draft, position)
    }

    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    pub fn matches_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Short form of the id for listings (first 7 chars).
    pub fn short_id(&self) -> &str {
        match self.id.as_deref() {
            Some(id) => id.get(..7).unwrap_or(id),
            None => "-------",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_title_gets_placeholder() {
        let note = Note::create(NoteDraft::default(), 3);
        assert_eq!(note.title, "Note 3");

        let draft = NoteDraft {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(Note::create(draft, 1).title, "Note 1");
    }

    #[test]
    fn test_draft_fields_carry_over() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let draft = NoteDraft {
            title: Some("Groceries".to_string()),
            content: Some("<p>Buy milk</p>".to_string()),
            tags: vec!["home".to_string()],
            checklist: vec![ChecklistItem::new("milk")],
            date: Some(date),
        };

        let note = Note::create(draft, 1);
        assert!(note.has_id());
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "<p>Buy milk</p>");
        assert!(note.has_tag("home"));
        assert_eq!(note.checklist, vec![ChecklistItem::new("milk")]);
        assert_eq!(note.date, date);
    }

    #[test]
    fn test_missing_fields_are_defaulted() {
        let note: Note = serde_json::from_str(r#"{"title": "Old"}"#).unwrap();
        assert!(note.id.is_none());
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert!(note.checklist.is_empty());
        assert_eq!(note.date, today());
    }

    #[test]
    fn test_null_fields_are_defaulted() {
        let note: Note = serde_json::from_str(
            r#"{"id": "a1", "title": null, "content": null, "tags": null, "checklist": null, "date": null}"#,
        )
        .unwrap();
        assert_eq!(note.title, "");
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert!(note.checklist.is_empty());
        assert_eq!(note.date, today());
        assert!(note.extra.is_empty());
    }

    #[test]
    fn test_checklist_done_defaults_false() {
        let note: Note =
            serde_json::from_str(r#"{"title": "x", "checklist": [{"text": "a"}]}"#).unwrap();
        assert!(!note.checklist[0].done);
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let raw = r#"{"id":"abc","title":"t","content":"","tags":[],"checklist":[],"date":"2024-01-02","pinned":true}"#;
        let note: Note = serde_json::from_str(raw).unwrap();
        assert_eq!(note.extra.get("pinned"), Some(&Value::Bool(true)));
        assert_eq!(serde_json::to_string(&note).unwrap(), raw);
    }

    #[test]
    fn test_short_id() {
        let mut note = Note::create(NoteDraft::default(), 1);
        assert_eq!(note.short_id().len(), 7);
        note.id = None;
        assert_eq!(note.short_id(), "-------");
    }
}
