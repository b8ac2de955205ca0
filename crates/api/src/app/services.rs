//! Store and credential-service wiring.

use std::sync::Arc;

use thiserror::Error;

use brewops_auth::{Argon2Hasher, AuthError, AuthService, CredentialStore, Hs256Jwt};
use brewops_core::StoreError;
use brewops_infra::{
    catalog::{CatalogStore, InMemoryCatalogStore, PostgresCatalogStore},
    credentials::{InMemoryCredentialStore, PostgresCredentialStore},
    db,
    inventory::{InMemoryInventoryStore, InventoryStore, PostgresInventoryStore},
};

use crate::config::{ApiConfig, StoreBackend};

const MAX_DB_CONNECTIONS: u32 = 10;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Everything a handler can reach. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    pub auth: AuthService,
    pub catalog: Arc<dyn CatalogStore>,
    pub inventory: Arc<dyn InventoryStore>,
}

impl AppServices {
    /// In-memory wiring (dev/test).
    pub fn in_memory(config: &ApiConfig, hasher: Argon2Hasher) -> Self {
        let credentials: Arc<dyn CredentialStore> = Arc::new(InMemoryCredentialStore::new());
        let catalog: Arc<dyn CatalogStore> = Arc::new(InMemoryCatalogStore::new());
        let inventory: Arc<dyn InventoryStore> =
            Arc::new(InMemoryInventoryStore::new(catalog.clone()));

        Self {
            auth: auth_service(config, credentials, hasher),
            catalog,
            inventory,
        }
    }

    /// Postgres wiring; bootstraps the schema before returning.
    pub async fn persistent(
        config: &ApiConfig,
        database_url: &str,
        hasher: Argon2Hasher,
    ) -> Result<Self, ServiceError> {
        let pool = db::connect(database_url, MAX_DB_CONNECTIONS).await?;
        db::ensure_schema(&pool).await?;

        let credentials: Arc<dyn CredentialStore> =
            Arc::new(PostgresCredentialStore::new(pool.clone()));

        Ok(Self {
            auth: auth_service(config, credentials, hasher),
            catalog: Arc::new(PostgresCatalogStore::new(pool.clone())),
            inventory: Arc::new(PostgresInventoryStore::new(pool)),
        })
    }
}

pub async fn build_services(config: &ApiConfig) -> Result<AppServices, ServiceError> {
    let hasher = Argon2Hasher::new()?;

    match &config.store {
        StoreBackend::InMemory => {
            tracing::info!("using in-memory stores");
            Ok(AppServices::in_memory(config, hasher))
        }
        StoreBackend::Postgres { database_url } => {
            tracing::info!("using postgres stores");
            AppServices::persistent(config, database_url, hasher).await
        }
    }
}

fn auth_service(
    config: &ApiConfig,
    credentials: Arc<dyn CredentialStore>,
    hasher: Argon2Hasher,
) -> AuthService {
    AuthService::new(
        credentials,
        Arc::new(hasher),
        Arc::new(Hs256Jwt::new(config.jwt_secret.as_bytes())),
        config.access_token_ttl,
    )
}
