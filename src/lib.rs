//! # notebox
//!
//! A small text-note store served over HTTP. Every note is a named text
//! record kept as an individual `{name}.txt` file in one storage directory.
//!
//! ## Features
//!
//! - **Note Store**: create, fetch, replace, delete and list notes with atomic file writes
//! - **Per-name serialization**: concurrent operations on one name never race their existence checks
//! - **Name hardening**: names that could escape the storage directory are rejected
//! - **Content negotiation**: replace bodies may be JSON objects or plain text
//! - **HTTP surface**: an axum router with request ids and access logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use notebox::shelf::{NoteStore, Shelf};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shelf = Shelf::ensure_exists("/tmp/notes")?;
//! let store = NoteStore::new(shelf);
//!
//! store.create("todo", "buy milk")?;
//! assert_eq!(store.fetch("todo")?, "buy milk");
//!
//! store.replace("todo", "buy bread")?;
//! for note in store.list()? {
//!     let note = note?;
//!     println!("{}: {}", note.name, note.content);
//! }
//!
//! store.delete("todo")?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **[`domain`]**: the [`domain::Note`] value, name validation, key derivation and atomic writes
//! - **[`shelf`]**: the storage directory, the per-name lock table and the [`shelf::NoteStore`]
//! - **[`payload`]**: the structured-or-text body accepted by replace
//! - **[`server`]**: HTTP routes mapped onto store calls
//! - **[`config`]**: command-line configuration
//! - **[`error`]**: unified error handling for the binary
//!
//! ## Concurrency
//!
//! Checking whether a note exists and then acting on the answer is not
//! atomic on a plain filesystem. [`shelf::NoteStore`] runs every operation on
//! a name under that name's lock, so of N concurrent creates for one unused
//! name exactly one succeeds and the rest fail with `AlreadyExists`.
//! Operations on different names run in parallel, and listing takes no
//! global lock.
//!
//! ## Error Handling
//!
//! Store operations return [`domain::NoteError`]. The binary works in
//! [`AppResult<T>`], which wraps [`AppError`] and converts from the
//! sub-module error types so `?` works throughout.

pub mod config;
pub mod domain;
pub mod error;
pub mod payload;
pub mod server;
pub mod shelf;

/// Re-exports the most commonly used types for convenience.
pub use domain::{Note, NoteError};
pub use error::{AppError, AppResult};
pub use shelf::{NoteStore, Shelf};
