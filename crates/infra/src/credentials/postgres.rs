use async_trait::async_trait;
use sqlx::{PgPool, Row};

use brewops_auth::{CredentialStore, Identity, NewIdentity, PasswordHash, Username};
use brewops_core::{IdentityId, StoreError};

use crate::db::map_sqlx_error;

/// Postgres-backed credential store (`users` table).
///
/// Username uniqueness is enforced by the table's `UNIQUE` constraint; the
/// losing side of a concurrent insert gets `StoreError::Duplicate`.
#[derive(Debug, Clone)]
pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_identity(row: &sqlx::postgres::PgRow) -> Result<Identity, StoreError> {
    let id: i64 = row
        .try_get("id")
        .map_err(|e| map_sqlx_error("decode users.id", e))?;
    let username: String = row
        .try_get("username")
        .map_err(|e| map_sqlx_error("decode users.username", e))?;
    let hashed_password: String = row
        .try_get("hashed_password")
        .map_err(|e| map_sqlx_error("decode users.hashed_password", e))?;

    Ok(Identity {
        id: IdentityId::new(id),
        username: Username::parse(&username)
            .map_err(|e| StoreError::backend(format!("stored username is invalid: {e}")))?,
        password_hash: PasswordHash::from_phc(hashed_password),
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| map_sqlx_error("find_by_username", e))?;

        let row = sqlx::query("SELECT id, username, hashed_password FROM users WHERE username = $1")
            .bind(username.as_str())
            .fetch_optional(&mut *conn)
            .await
            .map_err(|e| map_sqlx_error("find_by_username", e))?;

        row.as_ref().map(row_to_identity).transpose()
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("insert_identity", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, hashed_password)
            VALUES ($1, $2)
            RETURNING id, username, hashed_password
            "#,
        )
        .bind(identity.username.as_str())
        .bind(identity.password_hash.as_str())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("insert_identity", e))?;

        let stored = row_to_identity(&row)?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("insert_identity", e))?;

        Ok(stored)
    }
}
