use crate::domain::{self, Note, NoteError};
use crate::shelf::locks::KeyLocks;
use crate::shelf::storage::Shelf;
use std::fs::{self, ReadDir};
use std::io::ErrorKind;
use std::sync::Arc;

/// The note store: create, fetch, replace, delete and list over a [`Shelf`].
///
/// Each operation on a name runs under that name's lock in [`KeyLocks`], so
/// the existence check and the action that follows it are atomic with
/// respect to every other operation on the same name. Cloning is cheap and
/// clones share the same lock table.
#[derive(Debug, Clone)]
pub struct NoteStore {
    shelf: Arc<Shelf>,
    locks: Arc<KeyLocks>,
}

impl NoteStore {
    pub fn new(shelf: Shelf) -> Self {
        NoteStore {
            shelf: Arc::new(shelf),
            locks: Arc::new(KeyLocks::new()),
        }
    }

    /// Returns the shelf this store writes into.
    pub fn shelf(&self) -> &Shelf {
        &self.shelf
    }

    /// Persists a new note.
    ///
    /// # Errors
    /// - [`NoteError::InvalidName`] if `name` fails validation
    /// - [`NoteError::InvalidInput`] if `content` is empty
    /// - [`NoteError::AlreadyExists`] if the name is occupied; the stored
    ///   content is left untouched
    pub fn create(&self, name: &str, content: &str) -> Result<Note, NoteError> {
        let path = domain::note_path(&self.shelf.root, name)?;
        if content.is_empty() {
            return Err(NoteError::InvalidInput("note content cannot be empty"));
        }

        self.locks.with_key(name, || -> Result<Note, NoteError> {
            if path.exists() {
                log::debug!("create rejected, '{name}' already exists");
                return Err(NoteError::AlreadyExists(name.to_owned()));
            }

            // no-clobber so a file dropped in by another process still loses
            if !domain::create_atomic(&path, content.as_bytes())? {
                return Err(NoteError::AlreadyExists(name.to_owned()));
            }

            log::debug!("created note '{name}' ({} bytes)", content.len());
            Ok(Note::new(name, content))
        })
    }

    /// Returns the stored content of `name`.
    pub fn fetch(&self, name: &str) -> Result<String, NoteError> {
        let path = domain::note_path(&self.shelf.root, name)?;
        self.locks.with_key(name, || domain::read_note(&path, name))
    }

    /// Overwrites the content of an existing note. Prior content is discarded.
    ///
    /// # Errors
    /// Returns [`NoteError::NotFound`] if `name` is not stored.
    pub fn replace(&self, name: &str, content: &str) -> Result<Note, NoteError> {
        let path = domain::note_path(&self.shelf.root, name)?;

        self.locks.with_key(name, || -> Result<Note, NoteError> {
            if !path.is_file() {
                log::debug!("replace rejected, '{name}' not found");
                return Err(NoteError::NotFound(name.to_owned()));
            }

            domain::write_atomic(&path, content.as_bytes())?;
            log::debug!("replaced note '{name}' ({} bytes)", content.len());
            Ok(Note::new(name, content))
        })
    }

    /// Removes a note.
    ///
    /// # Errors
    /// Returns [`NoteError::NotFound`] if `name` is not stored.
    pub fn delete(&self, name: &str) -> Result<(), NoteError> {
        let path = domain::note_path(&self.shelf.root, name)?;

        self.locks.with_key(name, || -> Result<(), NoteError> {
            fs::remove_file(&path).map_err(|e| match e.kind() {
                ErrorKind::NotFound => NoteError::NotFound(name.to_owned()),
                _ => NoteError::FileError(e),
            })?;
            log::debug!("deleted note '{name}'");
            Ok(())
        })
    }

    /// Reports whether `name` is currently stored.
    pub fn exists(&self, name: &str) -> Result<bool, NoteError> {
        let path = domain::note_path(&self.shelf.root, name)?;
        Ok(self.locks.with_key(name, || path.is_file()))
    }

    /// Lists every stored note.
    ///
    /// The returned [`Notes`] reads the directory lazily and can be consumed
    /// once. Notes deleted while the listing is in progress are skipped; a
    /// note replaced meanwhile shows either its old or its new content.
    pub fn list(&self) -> Result<Notes, NoteError> {
        let entries = fs::read_dir(&self.shelf.root).map_err(NoteError::FileError)?;
        Ok(Notes {
            store: self.clone(),
            entries,
        })
    }
}

/// Single-pass iterator over the notes on a shelf, in directory order.
#[derive(Debug)]
pub struct Notes {
    store: NoteStore,
    entries: ReadDir,
}

impl Iterator for Notes {
    type Item = Result<Note, NoteError>;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => return Some(Err(NoteError::FileError(e))),
            };

            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }

            let file_name = entry.file_name();
            let Some(name) = file_name.to_str().and_then(domain::name_from_file) else {
                continue;
            };

            match self.store.fetch(name) {
                Ok(content) => return Some(Ok(Note::new(name, content))),
                // deleted after enumeration
                Err(NoteError::NotFound(_)) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
        None
    }
}
