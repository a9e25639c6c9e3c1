use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::entity::{new_note_id, Note, NoteDraft};
use crate::error::{NotesError, Result};

use super::NotesFile;

/// The note collection and its lifecycle operations.
///
/// Every mutation reloads the file, applies the change, and rewrites the
/// file while holding `write_lock`, so two writers sharing one store cannot
/// overwrite each other's changes. Writers in other processes are not
/// coordinated.
#[derive(Debug)]
pub struct NoteStore {
    file: NotesFile,
    write_lock: Mutex<()>,
}

impl NoteStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            file: NotesFile::new(path),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Number of times this store has rewritten the notes file.
    pub fn write_count(&self) -> usize {
        self.file.write_count()
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // The guarded state lives on disk; a panicked writer leaves nothing
        // half-applied in memory.
        self.write_lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the whole collection as stored, without backfilling ids.
    pub fn load(&self) -> Result<Vec<Note>> {
        self.file.load()
    }

    /// Replace the whole collection.
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        let _guard = self.lock();
        self.file.save(notes)
    }

    /// Load the collection, assigning and persisting ids for legacy notes.
    pub fn list(&self) -> Result<Vec<Note>> {
        self.backfill().map(|(notes, _)| notes)
    }

    /// Like [`NoteStore::list`], also reporting how many ids were assigned.
    pub fn backfill(&self) -> Result<(Vec<Note>, usize)> {
        let _guard = self.lock();
        let notes = self.file.load()?;
        self.backfill_locked(notes)
    }

    /// Point lookup by id.
    pub fn get(&self, id: &str) -> Result<Note> {
        self.file
            .load()?
            .into_iter()
            .find(|n| n.matches_id(id))
            .ok_or_else(|| NotesError::NotFound(id.to_string()))
    }

    /// Create a note from `draft`, append it and persist.
    pub fn create(&self, draft: NoteDraft) -> Result<Note> {
        let _guard = self.lock();
        let mut notes = self.file.load()?;

        let note = Note::create(draft, notes.len() + 1);
        notes.push(note.clone());
        self.file.save(&notes)?;

        tracing::info!(id = note.id.as_deref().unwrap_or_default(), title = %note.title, "created note");
        Ok(note)
    }

    /// Rewrite every field of an existing note except its id.
    pub fn replace(&self, id: &str, draft: NoteDraft) -> Result<Note> {
        let _guard = self.lock();
        let mut notes = self.file.load()?;

        let index = notes
            .iter()
            .position(|n| n.matches_id(id))
            .ok_or_else(|| NotesError::NotFound(id.to_string()))?;

        let mut updated = Note::from_draft(id.to_string(), draft, index + 1);
        updated.extra = std::mem::take(&mut notes[index].extra);
        notes[index] = updated.clone();
        self.file.save(&notes)?;

        tracing::info!(id, "replaced note");
        Ok(updated)
    }

    /// Remove the note with `id`. Returns whether anything was removed; when
    /// nothing matched the file is left untouched.
    pub fn delete_by_id(&self, id: &str) -> Result<bool> {
        let _guard = self.lock();
        let mut notes = self.file.load()?;

        let before = notes.len();
        notes.retain(|n| !n.matches_id(id));
        if notes.len() == before {
            tracing::debug!(id, "delete found no matching note");
            return Ok(false);
        }

        self.file.save(&notes)?;
        tracing::info!(id, "deleted note");
        Ok(true)
    }

    /// Assign ids to notes lacking one and persist the batch with a single
    /// write. Collections with no missing ids are returned without writing.
    pub fn backfill_missing_ids(&self, notes: Vec<Note>) -> Result<Vec<Note>> {
        let _guard = self.lock();
        self.backfill_locked(notes).map(|(notes, _)| notes)
    }

    fn backfill_locked(&self, mut notes: Vec<Note>) -> Result<(Vec<Note>, usize)> {
        let mut assigned = 0;
        for note in notes.iter_mut().filter(|n| !n.has_id()) {
            note.id = Some(new_note_id());
            assigned += 1;
        }

        if assigned > 0 {
            self.file.save(&notes)?;
            tracing::info!(assigned, "backfilled missing note ids");
        }
        Ok((notes, assigned))
    }
}
