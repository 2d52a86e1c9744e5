use serde::Serialize;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// File suffix appended to every note name to form its storage key.
pub const NOTE_SUFFIX: &str = ".txt";

/// Longest file name most filesystems accept (`NAME_MAX`), in bytes.
const MAX_FILE_NAME: usize = 255;

const FORBIDDEN_CHARS: [char; 9] = ['/', '\\', ':', '"', '*', '?', '<', '>', '|'];

#[derive(Debug, Error)]
pub enum NoteError {
    #[error("invalid note name: {0:?}")]
    InvalidName(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error("note '{0}' already exists")]
    AlreadyExists(String),
    #[error("note '{0}' not found")]
    NotFound(String),
    #[error(transparent)]
    FileError(std::io::Error),
}

/// A named text record persisted as `{name}.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    pub name: String,
    #[serde(rename = "text")]
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Note {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Validates a client-supplied note name.
///
/// Names are used verbatim, so nothing is trimmed or folded. Anything that
/// could escape the storage directory or collide with hidden and temporary
/// files is rejected instead: empty names, names starting with `.`, path
/// separators, characters invalid in filenames, control characters, and
/// names whose `{name}.txt` file name would exceed `NAME_MAX`.
pub fn validate_name(name: &str) -> Result<&str, NoteError> {
    let invalid = name.is_empty()
        || name.len() + NOTE_SUFFIX.len() > MAX_FILE_NAME
        || name.starts_with('.')
        || name.contains(&FORBIDDEN_CHARS[..])
        || name.chars().any(char::is_control);

    if invalid {
        return Err(NoteError::InvalidName(name.to_owned()));
    }

    Ok(name)
}

/// Derives the storage key for `name` under `root`.
///
/// Every operation goes through here so that create, fetch, replace and
/// delete address the same file.
pub fn note_path(root: &Path, name: &str) -> Result<PathBuf, NoteError> {
    let name = validate_name(name)?;
    Ok(root.join(format!("{name}{NOTE_SUFFIX}")))
}

/// Recovers a note name from a file name in the storage directory.
///
/// Returns `None` for anything that is not `{valid name}.txt`, which
/// covers in-flight temporary files as well as foreign files.
pub fn name_from_file(file_name: &str) -> Option<&str> {
    let name = file_name.strip_suffix(NOTE_SUFFIX)?;
    validate_name(name).ok()
}

/// Atomically replaces the file at `path` with `data`.
///
/// Writes data to a temporary file in the target directory and renames it
/// in place, so a concurrent reader sees either the old or the new content
/// and never a partial write.
pub(crate) fn write_atomic(path: &Path, data: &[u8]) -> Result<(), NoteError> {
    let tmp = staged(path, data)?;
    tmp.persist(path)
        .map_err(|e| NoteError::FileError(e.error))?;
    Ok(())
}

/// Atomically creates the file at `path`, failing if it already exists.
///
/// Returns `Ok(false)` when another writer got there first.
pub(crate) fn create_atomic(path: &Path, data: &[u8]) -> Result<bool, NoteError> {
    let tmp = staged(path, data)?;
    match tmp.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(NoteError::FileError(e.error)),
    }
}

fn staged(path: &Path, data: &[u8]) -> Result<NamedTempFile, NoteError> {
    let dir = path
        .parent()
        .ok_or_else(|| NoteError::InvalidName(path.display().to_string()))?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(NoteError::FileError)?;
    tmp.write_all(data).map_err(NoteError::FileError)?;
    tmp.as_file().sync_all().map_err(NoteError::FileError)?;
    Ok(tmp)
}

/// Reads a note file, mapping a missing file to `NotFound`.
pub(crate) fn read_note(path: &Path, name: &str) -> Result<String, NoteError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => NoteError::NotFound(name.to_owned()),
        _ => NoteError::FileError(e),
    })
}
