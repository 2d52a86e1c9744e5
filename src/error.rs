use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Note(#[from] crate::domain::NoteError),

    #[error(transparent)]
    Shelf(#[from] crate::shelf::storage::ShelfError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(String),
}

pub type AppResult<T> = Result<T, AppError>;
