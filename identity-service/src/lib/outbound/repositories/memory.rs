use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::models::Identity;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::IdentityStore;
use crate::identity::errors::IdentityError;

/// In-memory identity store satisfying the same contract as the Postgres
/// store. Backs the test suite; no durability.
///
/// Keyed by the normalized username. Creates take the write lock for the
/// whole check-and-insert, so concurrent creates of one username
/// serialize and at most one wins.
pub struct InMemoryIdentityStore {
    identities: RwLock<HashMap<String, Identity>>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            identities: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityStore for InMemoryIdentityStore {
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError> {
        let mut identities = self.identities.write().await;

        match identities.entry(identity.username.normalized()) {
            Entry::Occupied(_) => Err(IdentityError::DuplicateUsername(
                identity.username.as_str().to_string(),
            )),
            Entry::Vacant(entry) => {
                entry.insert(identity.clone());
                Ok(identity)
            }
        }
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Identity>, IdentityError> {
        let identities = self.identities.read().await;
        Ok(identities.get(&username.normalized()).cloned())
    }

    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(), IdentityError> {
        let mut identities = self.identities.write().await;

        match identities.get_mut(&username.normalized()) {
            Some(identity) => {
                identity.password_hash = password_hash.to_string();
                Ok(())
            }
            None => Err(IdentityError::NotFound(username.to_string())),
        }
    }

    async fn delete(&self, username: &Username) -> Result<(), IdentityError> {
        let mut identities = self.identities.write().await;

        match identities.remove(&username.normalized()) {
            Some(_) => Ok(()),
            None => Err(IdentityError::NotFound(username.to_string())),
        }
    }
}
