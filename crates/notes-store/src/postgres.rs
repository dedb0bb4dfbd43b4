//! PostgreSQL note repository.
//!
//! One implementation serves both identifier encodings; the codec decides the
//! `id` column type and how values are bound and read.

use std::fmt;
use std::marker::PhantomData;

use async_trait::async_trait;
use notes_core::{BlobCodec, NativeCodec, Note, NoteId, StorageCodec};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::repository::NoteRepository;
use crate::schema;
use crate::store::Store;

/// A codec that PostgreSQL can store.
pub trait PgIdColumn: StorageCodec {
    /// `CREATE TABLE IF NOT EXISTS` statement for this encoding.
    const SCHEMA: &'static str;

    /// Bind a storage value as the next query parameter.
    fn bind<'q>(
        query: Query<'q, Postgres, PgArguments>,
        value: Self::Value,
    ) -> Query<'q, Postgres, PgArguments>;

    /// Read the `id` column of a row.
    fn decode(row: &PgRow) -> Result<Self::Value, sqlx::Error>;
}

impl PgIdColumn for NativeCodec {
    const SCHEMA: &'static str = schema::NOTES_UUID_SCHEMA;

    fn bind<'q>(
        query: Query<'q, Postgres, PgArguments>,
        value: Uuid,
    ) -> Query<'q, Postgres, PgArguments> {
        query.bind(value)
    }

    fn decode(row: &PgRow) -> Result<Uuid, sqlx::Error> {
        row.try_get::<Uuid, _>("id")
    }
}

impl PgIdColumn for BlobCodec {
    const SCHEMA: &'static str = schema::NOTES_BYTEA_SCHEMA;

    fn bind<'q>(
        query: Query<'q, Postgres, PgArguments>,
        value: Vec<u8>,
    ) -> Query<'q, Postgres, PgArguments> {
        query.bind(value)
    }

    fn decode(row: &PgRow) -> Result<Vec<u8>, sqlx::Error> {
        row.try_get::<Vec<u8>, _>("id")
    }
}

/// Note repository backed by a PostgreSQL pool.
pub struct PgNoteRepository<C> {
    store: Store,
    page_size: u32,
    codec: PhantomData<fn() -> C>,
}

impl<C: PgIdColumn> PgNoteRepository<C> {
    /// Wrap an existing store. The schema is assumed to exist.
    pub fn new(store: Store, page_size: u32) -> Self {
        Self {
            store,
            page_size,
            codec: PhantomData,
        }
    }

    /// Wrap a store, creating the notes table first if asked to.
    pub async fn open(store: Store, page_size: u32, run_migrations: bool) -> StoreResult<Self> {
        if run_migrations {
            schema::run_migrations(store.pool(), C::SCHEMA).await?;
        }
        Ok(Self::new(store, page_size))
    }

    /// Get reference to the underlying store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    fn row_to_note(row: &PgRow) -> StoreResult<Note> {
        let id = C::from_storage(C::decode(row)?)?;
        let title: String = row.try_get("title")?;
        let content: String = row.try_get("content")?;
        Ok(Note::new(id, title, content))
    }
}

impl<C> Clone for PgNoteRepository<C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            page_size: self.page_size,
            codec: PhantomData,
        }
    }
}

impl<C: StorageCodec> fmt::Debug for PgNoteRepository<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgNoteRepository")
            .field("encoding", &C::NAME)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<C: PgIdColumn> NoteRepository for PgNoteRepository<C> {
    fn encoding(&self) -> &'static str {
        C::NAME
    }

    async fn list_page(&self, offset: u64) -> StoreResult<Vec<Note>> {
        let offset = i64::try_from(offset).unwrap_or(i64::MAX);

        let rows = sqlx::query(
            r#"
            SELECT id, title, content
            FROM notes
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(i64::from(self.page_size))
        .bind(offset)
        .fetch_all(self.store.pool())
        .await?;

        rows.iter().map(Self::row_to_note).collect()
    }

    async fn get_by_id(&self, id: NoteId) -> StoreResult<Note> {
        let query = sqlx::query(r#"SELECT id, title, content FROM notes WHERE id = $1"#);

        let row = C::bind(query, C::to_storage(id))
            .fetch_optional(self.store.pool())
            .await?
            .ok_or(StoreError::NoteNotFound(id))?;

        Self::row_to_note(&row)
    }

    async fn insert(&self, title: &str, content: &str) -> StoreResult<NoteId> {
        let id = NoteId::generate();

        let query = sqlx::query(
            r#"
            INSERT INTO notes (id, title, content)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        );

        let row = C::bind(query, C::to_storage(id))
            .bind(title)
            .bind(content)
            .fetch_optional(self.store.pool())
            .await?
            .ok_or(StoreError::WriteUnconfirmed)?;

        let committed = C::from_storage(C::decode(&row)?)?;
        tracing::debug!(note_id = %committed, encoding = C::NAME, "Inserted note");
        Ok(committed)
    }
}
