//! Schema definitions and bootstrap.
//!
//! The `notes` table differs between encodings only in the type of its `id`
//! column, so each codec carries its own embedded schema.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded schema for the native UUID encoding (notes_uuid.sql).
pub const NOTES_UUID_SCHEMA: &str = include_str!("../../../migrations/notes_uuid.sql");

/// Embedded schema for the opaque byte encoding (notes_bytea.sql).
pub const NOTES_BYTEA_SCHEMA: &str = include_str!("../../../migrations/notes_bytea.sql");

/// Create the notes table if it does not exist.
///
/// Idempotent; safe to run on every start.
pub async fn run_migrations(pool: &PgPool, schema: &str) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    sqlx::raw_sql(schema)
        .execute(pool)
        .await
        .map_err(|e| StoreError::MigrationError(format!("Notes schema failed: {}", e)))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Whether the `notes` table exists in the connection's current schema.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = current_schema()
            AND table_name = 'notes'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schemas_are_idempotent() {
        assert!(NOTES_UUID_SCHEMA.contains("CREATE TABLE IF NOT EXISTS notes"));
        assert!(NOTES_BYTEA_SCHEMA.contains("CREATE TABLE IF NOT EXISTS notes"));
    }

    #[test]
    fn test_schemas_differ_in_id_type() {
        assert!(NOTES_UUID_SCHEMA.contains("id      UUID PRIMARY KEY"));
        assert!(NOTES_BYTEA_SCHEMA.contains("id      BYTEA PRIMARY KEY"));
        for schema in [NOTES_UUID_SCHEMA, NOTES_BYTEA_SCHEMA] {
            assert!(schema.contains("title   TEXT NOT NULL"));
            assert!(schema.contains("content TEXT NOT NULL"));
        }
    }
}
