//! notes-store: Storage layer for the notes service
//!
//! This crate provides:
//! - The `NoteRepository` contract (list a page, get by id, insert)
//! - A PostgreSQL implementation generic over the identifier encoding
//! - An in-memory implementation with the same ordering
//! - Schema bootstrap for the `notes` table
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{StoreConfig, open};
//!
//! let config = StoreConfig::from_env()?;
//! let notes = open(&config).await?;
//!
//! let id = notes.insert("Groceries", "eggs, milk").await?;
//! let note = notes.get_by_id(id).await?;
//! let first_page = notes.list_page(0).await?;
//! ```

pub mod error;
pub mod memory;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryNoteRepository;
pub use postgres::{PgIdColumn, PgNoteRepository};
pub use repository::{DEFAULT_PAGE_SIZE, NoteRepository};
pub use store::{Backend, IdEncoding, Store, StoreConfig, open};

// Re-export notes-core for downstream crates
pub use notes_core;
