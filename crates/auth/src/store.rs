use std::sync::Arc;

use async_trait::async_trait;

use brewops_core::StoreError;

use crate::{Identity, NewIdentity, Username};

/// Durable identity records with username uniqueness.
///
/// Implementations must make `insert` the single source of truth for
/// uniqueness: of two concurrent inserts for one username, exactly one
/// succeeds and the other returns [`StoreError::Duplicate`].
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError>;

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError>;
}

#[async_trait]
impl<S> CredentialStore for Arc<S>
where
    S: CredentialStore + ?Sized,
{
    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        (**self).find_by_username(username).await
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        (**self).insert(identity).await
    }
}
