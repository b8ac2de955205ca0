use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use brewops_auth::{CredentialStore, Identity, NewIdentity, Username};
use brewops_core::{IdentityId, StoreError};

#[derive(Debug, Default)]
struct Inner {
    by_username: HashMap<Username, Identity>,
    last_id: i64,
}

/// In-memory credential store.
///
/// Intended for tests/dev. The uniqueness check and the insert happen under
/// one write lock, so concurrent registrations of a name have one winner.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.by_username.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop an identity. Tokens already issued for it stop resolving.
    pub fn remove(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(inner.by_username.remove(username))
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_username(&self, username: &Username) -> Result<Option<Identity>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::backend("lock poisoned"))?;
        Ok(inner.by_username.get(username).cloned())
    }

    async fn insert(&self, identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::backend("lock poisoned"))?;

        if inner.by_username.contains_key(&identity.username) {
            return Err(StoreError::duplicate(format!(
                "username {} already registered",
                identity.username
            )));
        }

        inner.last_id += 1;
        let stored = Identity {
            id: IdentityId::new(inner.last_id),
            username: identity.username,
            password_hash: identity.password_hash,
        };
        inner
            .by_username
            .insert(stored.username.clone(), stored.clone());
        Ok(stored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewops_auth::PasswordHash;

    fn new_identity(name: &str) -> NewIdentity {
        NewIdentity {
            username: Username::parse(name).unwrap(),
            password_hash: PasswordHash::from_phc("$argon2id$v=19$stub"),
        }
    }

    #[tokio::test]
    async fn insert_assigns_increasing_ids() {
        let store = InMemoryCredentialStore::new();
        let a = store.insert(new_identity("alice")).await.unwrap();
        let b = store.insert(new_identity("bob")).await.unwrap();
        assert!(b.id.get() > a.id.get());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = InMemoryCredentialStore::new();
        store.insert(new_identity("alice")).await.unwrap();
        let err = store.insert(new_identity("alice")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn find_returns_none_for_unknown_user() {
        let store = InMemoryCredentialStore::new();
        let name = Username::parse("nobody").unwrap();
        assert!(store.find_by_username(&name).await.unwrap().is_none());
    }
}
