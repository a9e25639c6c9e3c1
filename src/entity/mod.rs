mod draft;
mod note;

pub use draft::{parse_checklist, parse_date, parse_tags, NoteDraft};
pub use note::{ChecklistItem, Note};

use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Generate a fresh note id: 32 lowercase hex characters.
pub fn new_note_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
