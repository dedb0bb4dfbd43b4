//! In-memory note repository.
//!
//! Keyed by the codec's storage value so that it pages in the same order as
//! the PostgreSQL backend (`ORDER BY id`).

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use notes_core::{Note, NoteId, StorageCodec};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::repository::NoteRepository;

#[derive(Debug, Clone)]
struct StoredNote {
    title: String,
    content: String,
}

/// Note repository held in process memory.
pub struct MemoryNoteRepository<C: StorageCodec> {
    rows: RwLock<BTreeMap<C::Value, StoredNote>>,
    page_size: u32,
    codec: PhantomData<fn() -> C>,
}

impl<C: StorageCodec> MemoryNoteRepository<C> {
    /// Create an empty repository.
    pub fn new(page_size: u32) -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            page_size,
            codec: PhantomData,
        }
    }

    /// Number of stored notes.
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    /// Whether no notes are stored.
    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl<C: StorageCodec> fmt::Debug for MemoryNoteRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryNoteRepository")
            .field("encoding", &C::NAME)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: StorageCodec> NoteRepository for MemoryNoteRepository<C> {
    fn encoding(&self) -> &'static str {
        C::NAME
    }

    async fn list_page(&self, offset: u64) -> StoreResult<Vec<Note>> {
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let rows = self.rows.read().await;

        rows.iter()
            .skip(offset)
            .take(self.page_size as usize)
            .map(|(key, row)| -> StoreResult<Note> {
                let id = C::from_storage(key.clone())?;
                Ok(Note::new(id, row.title.clone(), row.content.clone()))
            })
            .collect()
    }

    async fn get_by_id(&self, id: NoteId) -> StoreResult<Note> {
        let rows = self.rows.read().await;
        let row = rows
            .get(&C::to_storage(id))
            .ok_or(StoreError::NoteNotFound(id))?;
        Ok(Note::new(id, row.title.clone(), row.content.clone()))
    }

    async fn insert(&self, title: &str, content: &str) -> StoreResult<NoteId> {
        let mut rows = self.rows.write().await;

        loop {
            let key = C::to_storage(NoteId::generate());
            if let Entry::Vacant(slot) = rows.entry(key.clone()) {
                slot.insert(StoredNote {
                    title: title.to_string(),
                    content: content.to_string(),
                });
                let committed = C::from_storage(key)?;
                tracing::debug!(note_id = %committed, encoding = C::NAME, "Inserted note");
                return Ok(committed);
            }
        }
    }
}
