//! The repository contract shared by every backend.
//!
//! Handlers hold an `Arc<dyn NoteRepository>` and never learn which backend
//! or identifier encoding sits behind it.

use std::fmt;

use async_trait::async_trait;
use notes_core::{Note, NoteId};

use crate::error::StoreResult;

/// Default number of notes returned by one `list_page` call.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Note persistence.
///
/// Each method is one unit of work against the store. Failures are returned,
/// never retried.
#[async_trait]
pub trait NoteRepository: Send + Sync + fmt::Debug {
    /// Name of the identifier encoding in use.
    fn encoding(&self) -> &'static str;

    /// Up to one page of notes in identifier order, skipping `offset` notes.
    ///
    /// Past the end this is an empty vector, not an error.
    async fn list_page(&self, offset: u64) -> StoreResult<Vec<Note>>;

    /// The note with this identifier, or `StoreError::NoteNotFound`.
    async fn get_by_id(&self, id: NoteId) -> StoreResult<Note>;

    /// Store a new note under a freshly generated identifier.
    ///
    /// Returns the identifier as read back from the store.
    async fn insert(&self, title: &str, content: &str) -> StoreResult<NoteId>;
}
