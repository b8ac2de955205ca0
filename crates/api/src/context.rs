use brewops_auth::{Identity, Username};
use brewops_core::IdentityId;

/// Identity resolved by the session gate for the current request.
///
/// Present on every request that reached a protected handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityContext {
    identity_id: IdentityId,
    username: Username,
}

impl IdentityContext {
    pub fn new(identity_id: IdentityId, username: Username) -> Self {
        Self {
            identity_id,
            username,
        }
    }

    pub fn identity_id(&self) -> IdentityId {
        self.identity_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }
}

impl From<Identity> for IdentityContext {
    fn from(identity: Identity) -> Self {
        Self::new(identity.id, identity.username)
    }
}
