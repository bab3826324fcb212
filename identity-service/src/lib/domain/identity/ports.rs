use async_trait::async_trait;

use crate::domain::identity::models::AuthenticateCommand;
use crate::domain::identity::models::ChangePasswordCommand;
use crate::domain::identity::models::Identity;
use crate::domain::identity::models::IdentityClaims;
use crate::domain::identity::models::RegisterCommand;
use crate::identity::errors::IdentityError;
use crate::identity::models::Username;

/// Port for identity domain service operations.
#[async_trait]
pub trait IdentityServicePort: Send + Sync + 'static {
    /// Register a new identity with validated credentials.
    ///
    /// Not idempotent: a second registration with the same username fails.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Username is already taken
    /// * `Hashing` - Password hashing failed
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<Identity, IdentityError>;

    /// Verify credentials and return the caller's identity claims.
    ///
    /// Side-effect free. Unknown username and wrong password produce the
    /// same `InvalidCredentials` outcome; the claims never include hash
    /// material.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Hashing` - Password verification machinery failed
    /// * `Database` - Store operation failed
    async fn authenticate(
        &self,
        command: AuthenticateCommand,
    ) -> Result<IdentityClaims, IdentityError>;

    /// Replace the stored password hash after verifying the current password.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong current password
    /// * `Hashing` - Password hashing failed
    /// * `Database` - Store operation failed
    async fn change_password(&self, command: ChangePasswordCommand) -> Result<(), IdentityError>;

    /// Retrieve identity claims by username.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn get_identity(&self, username: &Username) -> Result<IdentityClaims, IdentityError>;

    /// Delete an existing identity.
    ///
    /// Not idempotent: deleting an absent identity is an error.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn delete_identity(&self, username: &Username) -> Result<(), IdentityError>;
}

/// Persistence operations for the identity aggregate.
///
/// The store owns all identity records and their uniqueness guarantee.
/// Usernames compare case-insensitively; implementations key on the
/// normalized form.
#[async_trait]
pub trait IdentityStore: Send + Sync + 'static {
    /// Persist a new identity.
    ///
    /// Atomic with respect to concurrent creates of the same username: at
    /// most one survives. A successful create is durable before returning.
    ///
    /// # Errors
    /// * `DuplicateUsername` - Normalized username is already taken
    /// * `Database` - Store operation failed
    async fn create(&self, identity: Identity) -> Result<Identity, IdentityError>;

    /// Retrieve an identity by username.
    ///
    /// # Returns
    /// Optional identity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_username(&self, username: &Username)
        -> Result<Option<Identity>, IdentityError>;

    /// Replace the stored password hash for an existing identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn update_password_hash(
        &self,
        username: &Username,
        password_hash: &str,
    ) -> Result<(), IdentityError>;

    /// Remove an identity.
    ///
    /// # Errors
    /// * `NotFound` - Identity does not exist
    /// * `Database` - Store operation failed
    async fn delete(&self, username: &Username) -> Result<(), IdentityError>;
}
