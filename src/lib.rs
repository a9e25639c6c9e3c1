pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod export;
pub mod search;
pub mod server;
pub mod share;
pub mod storage;
pub mod tags;

pub use entity::{ChecklistItem, Note, NoteDraft};
pub use error::{NotesError, Result};
pub use search::{filter, NoteFilter, TagFilter};
pub use share::{resolve_shared, SharedNote};
pub use storage::NoteStore;
pub use tags::all_tags;
