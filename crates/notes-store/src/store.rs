//! Store configuration, connection pool, and backend selection.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use notes_core::{BlobCodec, NativeCodec};
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryNoteRepository;
use crate::postgres::PgNoteRepository;
use crate::repository::{DEFAULT_PAGE_SIZE, NoteRepository};

/// Where notes are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// PostgreSQL via `DATABASE_URL`.
    #[default]
    Postgres,
    /// Process memory; lost on restart.
    Memory,
}

impl FromStr for Backend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(StoreError::ConfigError(format!(
                "unknown backend {:?} (expected \"postgres\" or \"memory\")",
                other
            ))),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Postgres => f.write_str("postgres"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// How identifiers are laid out in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdEncoding {
    /// Native UUID column.
    #[default]
    Native,
    /// Opaque byte column.
    Blob,
}

impl FromStr for IdEncoding {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native" | "uuid" => Ok(Self::Native),
            "blob" | "bytea" => Ok(Self::Blob),
            other => Err(StoreError::ConfigError(format!(
                "unknown id encoding {:?} (expected \"native\" or \"blob\")",
                other
            ))),
        }
    }
}

impl fmt::Display for IdEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::Blob => f.write_str("blob"),
        }
    }
}

/// Configuration for opening the note store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Storage backend.
    pub backend: Backend,
    /// Database connection URL. Required for the postgres backend.
    pub database_url: Option<String>,
    /// Identifier encoding.
    pub id_encoding: IdEncoding,
    /// Notes per `list_page` call.
    pub page_size: u32,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
    /// Minimum number of connections to maintain.
    pub min_connections: u32,
    /// Create the notes table on connect.
    pub run_migrations: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Postgres,
            database_url: None,
            id_encoding: IdEncoding::Native,
            page_size: DEFAULT_PAGE_SIZE,
            max_connections: 10,
            min_connections: 1,
            run_migrations: true,
        }
    }
}

impl StoreConfig {
    /// In-memory configuration with the given encoding, mostly for tests.
    pub fn memory(id_encoding: IdEncoding) -> Self {
        Self {
            backend: Backend::Memory,
            id_encoding,
            ..Self::default()
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads:
    /// - `NOTES_BACKEND` - Optional, `postgres` (default) or `memory`
    /// - `DATABASE_URL` - Required for the postgres backend
    /// - `NOTES_ID_ENCODING` - Optional, `native` (default) or `blob`
    /// - `NOTES_PAGE_SIZE` - Optional, defaults to 10
    /// - `DATABASE_MAX_CONNECTIONS` - Optional, defaults to 10
    /// - `DATABASE_MIN_CONNECTIONS` - Optional, defaults to 1
    /// - `DATABASE_RUN_MIGRATIONS` - Optional, defaults to true
    pub fn from_env() -> StoreResult<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> StoreResult<Self> {
        let defaults = Self::default();

        let backend = match var("NOTES_BACKEND") {
            Some(s) => s.parse()?,
            None => defaults.backend,
        };

        let database_url = var("DATABASE_URL");
        if backend == Backend::Postgres && database_url.is_none() {
            return Err(StoreError::ConfigError(
                "DATABASE_URL environment variable not set".to_string(),
            ));
        }

        let id_encoding = match var("NOTES_ID_ENCODING") {
            Some(s) => s.parse()?,
            None => defaults.id_encoding,
        };

        let page_size = match var("NOTES_PAGE_SIZE") {
            Some(s) => match s.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(StoreError::ConfigError(format!(
                        "NOTES_PAGE_SIZE must be a positive integer, got {:?}",
                        s
                    )));
                }
            },
            None => defaults.page_size,
        };

        let max_connections = var("DATABASE_MAX_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.max_connections);

        let min_connections = var("DATABASE_MIN_CONNECTIONS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(defaults.min_connections);

        let run_migrations = var("DATABASE_RUN_MIGRATIONS")
            .map(|s| s.to_lowercase() != "false" && s != "0")
            .unwrap_or(defaults.run_migrations);

        Ok(Self {
            backend,
            database_url,
            id_encoding,
            page_size,
            max_connections,
            min_connections,
            run_migrations,
        })
    }
}

/// PostgreSQL connection pool.
///
/// Owns the pool's lifecycle; repositories borrow connections per call.
#[derive(Debug, Clone)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect to the database with the given configuration.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let database_url = config.database_url.as_deref().ok_or_else(|| {
            StoreError::ConfigError("DATABASE_URL is required for postgres".to_string())
        })?;

        tracing::info!("Connecting to database...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(database_url)
            .await?;

        tracing::info!("Connected to database");

        Ok(Self { pool })
    }

    /// Create a store from an existing connection pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Open the configured backend and encoding as a repository.
///
/// This is the only place that chooses a backend or an encoding.
pub async fn open(config: &StoreConfig) -> StoreResult<Arc<dyn NoteRepository>> {
    tracing::info!(
        backend = %config.backend,
        id_encoding = %config.id_encoding,
        page_size = config.page_size,
        "Opening note store"
    );

    let repository: Arc<dyn NoteRepository> = match (config.backend, config.id_encoding) {
        (Backend::Memory, IdEncoding::Native) => {
            Arc::new(MemoryNoteRepository::<NativeCodec>::new(config.page_size))
        }
        (Backend::Memory, IdEncoding::Blob) => {
            Arc::new(MemoryNoteRepository::<BlobCodec>::new(config.page_size))
        }
        (Backend::Postgres, IdEncoding::Native) => {
            let store = Store::connect(config).await?;
            Arc::new(
                PgNoteRepository::<NativeCodec>::open(
                    store,
                    config.page_size,
                    config.run_migrations,
                )
                .await?,
            )
        }
        (Backend::Postgres, IdEncoding::Blob) => {
            let store = Store::connect(config).await?;
            Arc::new(
                PgNoteRepository::<BlobCodec>::open(
                    store,
                    config.page_size,
                    config.run_migrations,
                )
                .await?,
            )
        }
    };

    Ok(repository)
}
