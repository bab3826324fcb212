use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::models::ChangePasswordCommand;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityClaims;
use crate::domain::identity::models::IdentityId;
use crate::domain::identity::models::Password;
use crate::domain::identity::models::RegisterCommand;
use crate::domain::identity::models::Username;
use crate::identity::errors::IdentityError;
use crate::identity::ports::IdentityServicePort;
use crate::identity::ports::IdentityStore;

/// Domain service implementation for identity operations.
///
/// Concrete implementation of IdentityServicePort with dependency
/// injection. Holds no per-request state; every invocation is independent
/// and safe to run concurrently.
pub struct IdentityService<S>
where
    S: IdentityStore,
{
    store: Arc<S>,
    password_hasher: Arc<auth::PasswordHasher>,
    fallback_hash: String,
}

impl<S> IdentityService<S>
where
    S: IdentityStore,
{
    /// Create a new identity service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Identity persistence implementation
    /// * `password_hasher` - Configured password hasher
    ///
    /// # Errors
    /// * `Hashing` - Fallback hash computation failed
    pub fn new(store: Arc<S>, password_hasher: Arc<auth::PasswordHasher>) -> Result<Self, IdentityError> {
        // Hashed once at construction; authentication against an unknown
        // username verifies this instead of returning early, so the two
        // failure paths cost the same.
        let fallback_hash = password_hasher.hash("fallback-credential")?;

        Ok(Self {
            store,
            password_hasher,
            fallback_hash,
        })
    }

    /// Hash a password on the blocking pool.
    ///
    /// Argon2 pins a core for the full cost factor; running it off the
    /// async dispatch path keeps one hash from stalling unrelated requests.
    async fn hash_password(&self, password: Password) -> Result<String, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| IdentityError::Unknown(e.to_string()))?
            .map_err(IdentityError::from)
    }

    /// Verify a password against a stored hash on the blocking pool.
    async fn verify_password(
        &self,
        password: Password,
        password_hash: String,
    ) -> Result<bool, IdentityError> {
        let hasher = Arc::clone(&self.password_hasher);
        tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &password_hash))
            .await
            .map_err(|e| IdentityError::Unknown(e.to_string()))?
            .map_err(IdentityError::from)
    }
}

#[async_trait]
impl<S> IdentityServicePort for IdentityService<S>
where
    S: IdentityStore,
{
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError> {
        let password_hash = self.hash_password(command.password).await?;

        let identity = Identity {
            id: IdentityId::new(),
            username: command.username,
            name: command.name,
            surname: command.surname,
            password_hash,
            created_at: Utc::now(),
        };

        let created = self.store.create(identity).await?;

        tracing::info!(username = %created.username, "Identity registered");

        Ok(created)
    }

    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<IdentityClaims, IdentityError> {
        let AuthenticateCommand { username, password } = command;

        match self.store.find_by_username(&username).await? {
            Some(identity) => {
                if self
                    .verify_password(password, identity.password_hash.clone())
                    .await?
                {
                    Ok(IdentityClaims::from(&identity))
                } else {
                    Err(IdentityError::InvalidCredentials)
                }
            }
            None => {
                // Burn an equivalent verification so an unknown username
                // takes as long as a wrong password against a real one.
                let _ = self
                    .verify_password(password, self.fallback_hash.clone())
                    .await?;
                Err(IdentityError::InvalidCredentials)
            }
        }
    }

    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), IdentityError> {
        let ChangePasswordCommand {
            username,
            current_password,
            new_password,
        } = command;

        let identity = match self.store.find_by_username(&username).await? {
            Some(identity) => identity,
            None => {
                let _ = self
                    .verify_password(current_password, self.fallback_hash.clone())
                    .await?;
                return Err(IdentityError::InvalidCredentials);
            }
        };

        if !self
            .verify_password(current_password, identity.password_hash.clone())
            .await?
        {
            return Err(IdentityError::InvalidCredentials);
        }

        let new_hash = self.hash_password(new_password).await?;
        self.store.update_password_hash(&username, &new_hash).await?;

        tracing::info!(username = %username, "Password changed");

        Ok(())
    }

    async fn get_identity(&self, username: &Username) -> Result<IdentityClaims, IdentityError> {
        self.store
            .find_by_username(username)
            .await?
            .map(|ref identity| IdentityClaims::from(identity))
            .ok_or_else(|| IdentityError::NotFound(username.to_string()))
    }

    async fn delete_identity(&self, username: &Username) -> Result<(), IdentityError> {
        self.store.delete(username).await?;

        tracing::info!(username = %username, "Identity deleted");

        Ok(())
    }
}
