use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::entity::Note;
use crate::error::{NotesError, Result};

/// The durable note collection: one JSON array, read whole and written whole.
#[derive(Debug)]
pub struct NotesFile {
    path: PathBuf,
    writes: AtomicUsize,
}

impl NotesFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            writes: AtomicUsize::new(0),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of completed writes through this handle.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::Relaxed)
    }

    /// Read the full collection. A missing file is an empty collection.
    pub fn load(&self) -> Result<Vec<Note>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "notes file absent, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(NotesError::storage(&self.path, e)),
        };

        let notes: Vec<Note> =
            serde_json::from_slice(&bytes).map_err(|e| NotesError::storage(&self.path, e))?;
        tracing::debug!(path = %self.path.display(), count = notes.len(), "loaded notes");
        Ok(notes)
    }

    /// Replace the full collection.
    ///
    /// Writes a sibling temp file and renames it over the target, so readers
    /// see either the old or the new collection, never a partial one.
    pub fn save(&self, notes: &[Note]) -> Result<()> {
        let body = serde_json::to_vec_pretty(notes)?;
        self.write_atomic(&body)
            .map_err(|e| NotesError::storage(&self.path, e))?;
        self.writes.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(path = %self.path.display(), count = notes.len(), "saved notes");
        Ok(())
    }

    fn write_atomic(&self, body: &[u8]) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "invalid notes file name"))?;
        let tmp_path = parent.join(format!(
            ".{}.tmp.{}",
            file_name,
            uuid::Uuid::new_v4().simple()
        ));

        let written =
            write_synced(&tmp_path, body).and_then(|()| fs::rename(&tmp_path, &self.path));
        if let Err(e) = written {
            // The temp file may be partial or absent
            let _ = fs::remove_file(&tmp_path);
            return Err(e);
        }
        Ok(())
    }
}

fn write_synced(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut tmp = fs::OpenOptions::new()
        .create_new(true)
        .write(true)
        .open(path)?;
    tmp.write_all(body)?;
    tmp.sync_all()
}
