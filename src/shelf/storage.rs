use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShelfError {
    #[error("shelf path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The directory holding every note file.
#[derive(Debug, Clone)]
pub struct Shelf {
    pub root: PathBuf,
}

impl Shelf {
    /// Opens an existing shelf directory.
    ///
    /// - Returns [`ShelfError::Io`] with `NotFound` if the path does not exist.
    /// - Returns [`ShelfError::NotADirectory`] if the path exists but is a file.
    pub fn open(root: impl AsRef<Path>) -> Result<Self, ShelfError> {
        let root = root.as_ref();
        let meta = fs::metadata(root)?;

        if !meta.is_dir() {
            return Err(ShelfError::NotADirectory(root.to_path_buf()));
        }

        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Ensures the shelf directory exists, creating it and any missing
    /// parents, then opens it.
    ///
    /// Used at startup where creation vs. opening does not matter.
    pub fn ensure_exists(root: impl AsRef<Path>) -> Result<Self, ShelfError> {
        let root = root.as_ref();
        if !root.exists() {
            fs::create_dir_all(root)?;
            log::info!("created storage directory {}", root.display());
        }

        Shelf::open(root)
    }
}
