//! Note store
//!
//! Directory-backed persistence for markdown notes. Each note is a single
//! file named `<prefix>-<slug>.md` inside one flat directory; the directory
//! listing is the only index. The directory path and filename prefix are
//! injected at construction time so tests can run against temp directories.

use crate::slug::slugify;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File extension for note files
pub const NOTE_EXTENSION: &str = "md";

/// Note store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note file does not exist
    #[error("Note not found: {0}")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Metadata for one stored note, as reported by [`NoteStore::list`]
#[derive(Debug, Clone, Serialize)]
pub struct NoteSummary {
    /// On-disk filename
    pub filename: String,
    /// Title reconstructed from the filename. Lossy: the original casing and
    /// punctuation are not recoverable once slugified.
    pub title: String,
    /// Last modification time
    pub last_modified: DateTime<Local>,
    /// File size in bytes
    pub size: u64,
}

/// Directory-backed note storage
#[derive(Debug, Clone)]
pub struct NoteStore {
    notes_dir: PathBuf,
    file_prefix: String,
}

impl NoteStore {
    /// Create a store rooted at `notes_dir`, naming files `<prefix>-<slug>.md`
    pub fn new(notes_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            notes_dir: notes_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    /// The directory this store writes into
    pub fn notes_dir(&self) -> &Path {
        &self.notes_dir
    }

    /// Create the notes directory (and parents) if it does not exist yet
    pub fn ensure_directory(&self) -> Result<(), StoreError> {
        if !self.notes_dir.exists() {
            std::fs::create_dir_all(&self.notes_dir)?;
        }
        Ok(())
    }

    /// Filename a title resolves to
    pub fn file_name_for(&self, title: &str) -> String {
        format!(
            "{}-{}.{}",
            self.file_prefix,
            slugify(title),
            NOTE_EXTENSION
        )
    }

    /// Full on-disk path a title resolves to
    pub fn path_for(&self, title: &str) -> PathBuf {
        self.notes_dir.join(self.file_name_for(title))
    }

    /// Save a note, replacing any previous note with the same slug.
    ///
    /// A human-readable timestamp line is prepended to the content before it
    /// is written. Returns the resolved filename.
    pub fn save(&self, title: &str, content: &str) -> Result<String, StoreError> {
        self.ensure_directory()?;

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let stamped = format!("*Created/Updated: {}*\n\n{}", timestamp, content);

        let filename = self.file_name_for(title);
        std::fs::write(self.notes_dir.join(&filename), stamped)?;
        Ok(filename)
    }

    /// List all notes, newest-modified first.
    ///
    /// An empty vector means the store holds no notes. Ties between equal
    /// modification times keep the enumeration order of the directory.
    pub fn list(&self) -> Result<Vec<NoteSummary>, StoreError> {
        self.ensure_directory()?;

        let mut notes = Vec::new();
        for entry in std::fs::read_dir(&self.notes_dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path
                .extension()
                .is_some_and(|ext| ext == NOTE_EXTENSION)
            {
                continue;
            }
            let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let title = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or(filename)
                .to_string();

            let metadata = entry.metadata()?;
            let last_modified: DateTime<Local> = metadata.modified()?.into();

            notes.push(NoteSummary {
                filename: filename.to_string(),
                title,
                last_modified,
                size: metadata.len(),
            });
        }

        notes.sort_by_key(|n| std::cmp::Reverse(n.last_modified));
        Ok(notes)
    }

    /// Read a note's raw on-disk content.
    ///
    /// Returns [`StoreError::NotFound`] when no file exists for the title's
    /// slug. The whole file is loaded into memory.
    pub fn read(&self, title: &str) -> Result<String, StoreError> {
        let path = self.path_for(title);
        if !path.exists() {
            return Err(StoreError::NotFound(self.file_name_for(title)));
        }
        Ok(std::fs::read_to_string(path)?)
    }
}
