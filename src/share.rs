//! Anonymous read-only sharing.
//!
//! Holding a note's id is the only credential: anyone with the id can read
//! the shared projection. There is no access control here.

use serde::{Deserialize, Serialize};

use crate::entity::{ChecklistItem, Note};
use crate::error::{NotesError, Result};

/// Query parameter carrying the note id in share links.
pub const SHARE_PARAM: &str = "note_id";

/// Public view of a shared note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedNote {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub checklist: Vec<ChecklistItem>,
}

impl From<&Note> for SharedNote {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            tags: note.tags.clone(),
            checklist: note.checklist.clone(),
        }
    }
}

/// Find the note with `id` and project it for sharing.
pub fn resolve_shared(id: &str, notes: &[Note]) -> Result<SharedNote> {
    notes
        .iter()
        .find(|n| n.matches_id(id))
        .map(SharedNote::from)
        .ok_or_else(|| NotesError::NotFound(id.to_string()))
}

/// Build the share URL for `id` under `base_url`.
pub fn share_link(base_url: &str, id: &str) -> String {
    format!("{}?{}={}", base_url, SHARE_PARAM, id)
}
