//! Storage side of the note store: the configured directory, the per-name
//! lock table, and the store operations built on top of them.

pub mod locks;
pub mod storage;
pub mod store;

pub use locks::KeyLocks;
pub use storage::{Shelf, ShelfError};
pub use store::{NoteStore, Notes};
