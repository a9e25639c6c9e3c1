mod json_file;
mod note_store;

pub use json_file::NotesFile;
pub use note_store::NoteStore;
