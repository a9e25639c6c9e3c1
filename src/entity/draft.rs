// src/entity/draft.rs
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ChecklistItem;
use crate::error::{NotesError, Result};

/// Caller-supplied fields for creating or rewriting a note.
///
/// Every field is optional on the wire; absent values fall back to the
/// note defaults rather than being rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<ChecklistItem>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Split a comma separated tag field, dropping blank entries.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// One unchecked item per non-blank line.
pub fn parse_checklist(raw: &str) -> Vec<ChecklistItem> {
    raw.lines()
        .filter(|line| !line.trim().is_empty())
        .map(ChecklistItem::new)
        .collect()
}

/// Parse a YYYY-MM-DD date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        NotesError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", raw))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags("home, work,,  errands "), vec!["home", "work", "errands"]);
        assert!(parse_tags("").is_empty());
        assert!(parse_tags(" , ,").is_empty());
    }

    #[test]
    fn test_parse_checklist_skips_blank_lines() {
        let items = parse_checklist("milk\n\n  \neggs");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].text, "milk");
        assert_eq!(items[1].text, "eggs");
        assert!(items.iter().all(|i| !i.done));
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("2025-06-15").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 15).unwrap());
        assert!(matches!(parse_date("15/06/2025"), Err(NotesError::InvalidInput(_))));
    }

    #[test]
    fn test_draft_accepts_partial_json() {
        let draft: NoteDraft = serde_json::from_str(r#"{"content": "hi"}"#).unwrap();
        assert_eq!(draft.content.as_deref(), Some("hi"));
        assert!(draft.title.is_none());
        assert!(draft.tags.is_empty());
        assert!(draft.date.is_none());
    }
}
