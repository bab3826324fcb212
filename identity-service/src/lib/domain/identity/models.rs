use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::identity::errors::PasswordError;
use crate::identity::errors::PersonNameError;
use crate::identity::errors::UsernameError;

/// Identity aggregate entity.
///
/// Represents one registered user. Created exactly once per username by
/// registration; the password hash is the only field an existing record
/// ever changes.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: IdentityId,
    pub username: Username,
    pub name: PersonName,
    pub surname: PersonName,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identity unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityId(pub Uuid);

impl IdentityId {
    /// Generate a new random identity ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for IdentityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for IdentityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Username value type
///
/// Ensures username is 3-32 characters and contains only alphanumeric,
/// underscore, and hyphen. Stored case-preserving; uniqueness and lookup
/// use the normalized (lowercased) form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    const MIN_LENGTH: usize = 3;
    const MAX_LENGTH: usize = 32;

    /// Create a new valid username.
    ///
    /// Validates length and character constraints.
    ///
    /// # Errors
    /// * `TooShort` - Username shorter than 3 characters
    /// * `TooLong` - Username longer than 32 characters
    /// * `InvalidCharacters` - Contains non-alphanumeric characters (except _ and -)
    pub fn new(username: String) -> Result<Self, UsernameError> {
        let username = Self::with_valid_length(username)?;
        let username = Self::with_valid_chars(username)?;
        Ok(Self(username))
    }

    fn with_valid_length(username: String) -> Result<String, UsernameError> {
        let length = username.len();
        if length < Self::MIN_LENGTH {
            Err(UsernameError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            })
        } else if length > Self::MAX_LENGTH {
            Err(UsernameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(username)
        }
    }

    fn with_valid_chars(username: String) -> Result<String, UsernameError> {
        if username
            .chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '-')
        {
            Ok(username)
        } else {
            Err(UsernameError::InvalidCharacters)
        }
    }

    /// Get username as entered at registration.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lowercased form used for uniqueness and lookup.
    pub fn normalized(&self) -> String {
        self.0.to_lowercase()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Name value type for given name and surname.
///
/// Trimmed, non-empty, at most 64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    const MAX_LENGTH: usize = 64;

    /// Create a new validated name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, PersonNameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PersonNameError::Empty);
        }
        let length = name.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(PersonNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(name.to_string()))
    }

    /// Get name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Plaintext password as received from a caller.
///
/// Exists only transiently in memory during a single request; never
/// persisted, serialized, or logged. The length bound matches the one the
/// hasher enforces, so registration and login accept the same inputs.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    /// Create a new validated password.
    ///
    /// # Errors
    /// * `Empty` - Password is empty
    /// * `TooLong` - Password exceeds `auth::MAX_PASSWORD_BYTES` bytes
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        let length = password.len();
        if length > auth::MAX_PASSWORD_BYTES {
            return Err(PasswordError::TooLong {
                max: auth::MAX_PASSWORD_BYTES,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    /// Get password as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Hash-free projection of an identity returned to authenticated callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityClaims {
    pub id: String,
    pub username: String,
    pub name: String,
}

impl From<&Identity> for IdentityClaims {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            username: identity.username.as_str().to_string(),
            name: identity.name.as_str().to_string(),
        }
    }
}

/// Command to register a new identity with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub name: PersonName,
    pub surname: PersonName,
    pub username: Username,
    pub password: Password,
}

impl RegisterCommand {
    /// Construct a new register command from validated fields.
    pub fn new(name: PersonName, surname: PersonName, username: Username, password: Password) -> Self {
        Self {
            name,
            surname,
            username,
            password,
        }
    }
}

/// Command to authenticate an existing identity
#[derive(Debug)]
pub struct AuthenticateCommand {
    pub username: Username,
    pub password: Password,
}

impl AuthenticateCommand {
    pub fn new(username: Username, password: Password) -> Self {
        Self { username, password }
    }
}

/// Command to replace an identity's password
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub username: Username,
    pub current_password: Password,
    pub new_password: Password,
}

impl ChangePasswordCommand {
    pub fn new(username: Username, current_password: Password, new_password: Password) -> Self {
        Self {
            username,
            current_password,
            new_password,
        }
    }
}
