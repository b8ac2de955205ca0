//! Postgres pool, schema bootstrap and error mapping.
//!
//! ## Error Mapping
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | Database (unique violation) | `23505` | `Duplicate` | Username already taken (concurrent registration) |
//! | Database (foreign key violation) | `23503` | `NotFound` | Batch references a missing beer type, sale a missing batch |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | PoolClosed / PoolTimedOut / Io / Tls | N/A | `Backend` | Connection failures |
//!
//! ## Connection Scope
//!
//! Stores never hold a connection across calls. Each operation acquires a
//! pooled connection (or begins a transaction for writes) and the guard's
//! `Drop` hands it back on every exit path; an uncommitted transaction is
//! rolled back.

use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

use brewops_core::StoreError;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS breweries (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        location TEXT,
        establishment_date DATE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS beer_types (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT,
        alcohol_content DOUBLE PRECISION,
        description TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS ingredients (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        type TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS batches (
        id BIGSERIAL PRIMARY KEY,
        beer_type_id BIGINT NOT NULL REFERENCES beer_types(id),
        production_date DATE NOT NULL,
        volume DOUBLE PRECISION NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sales (
        id BIGSERIAL PRIMARY KEY,
        batch_id BIGINT NOT NULL REFERENCES batches(id),
        sale_date DATE NOT NULL,
        quantity DOUBLE PRECISION NOT NULL,
        price DOUBLE PRECISION NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS sales_batch_id_idx ON sales (batch_id)",
];

/// Open a connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

/// Create every table if missing. Idempotent; runs in one transaction.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }

    tx.commit()
        .await
        .map_err(|e| map_sqlx_error("ensure_schema", e))?;

    tracing::info!(tables = SCHEMA.len() - 1, "database schema ready");
    Ok(())
}

/// Map SQLx errors onto the store error vocabulary.
pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            let msg = format!("database error in {}: {}", operation, db_err.message());

            match db_err.code().as_deref() {
                Some("23505") => StoreError::Duplicate(msg),
                Some("23503") => StoreError::NotFound(msg),
                _ => StoreError::Backend(msg),
            }
        }
        sqlx::Error::PoolClosed => {
            StoreError::backend(format!("connection pool closed in {}", operation))
        }
        sqlx::Error::PoolTimedOut => {
            StoreError::backend(format!("timed out acquiring a connection in {}", operation))
        }
        _ => StoreError::backend(format!("sqlx error in {}: {}", operation, err)),
    }
}

/// Convert a `Page` into SQL `OFFSET`/`LIMIT` binds.
pub(crate) fn offset_limit(page: brewops_core::Page) -> (i64, i64) {
    (i64::from(page.skip()), i64::from(page.limit()))
}
