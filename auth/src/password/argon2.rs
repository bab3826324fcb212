use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as HashError;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Maximum accepted plaintext length in bytes.
///
/// Enforced identically by [`PasswordHasher::hash`] and
/// [`PasswordHasher::verify`], so a password accepted at registration is
/// accepted verbatim at login. Bounds the work an attacker can force
/// through a single request.
pub const MAX_PASSWORD_BYTES: usize = 128;

/// Valid range and default for the configurable time cost (iterations).
pub const MIN_TIME_COST: u32 = 2;
pub const MAX_TIME_COST: u32 = 16;
pub const DEFAULT_TIME_COST: u32 = 3;

// Fixed Argon2id deployment profile; only the time cost is tunable.
// 19 MiB keeps GPU cracking expensive while remaining server friendly,
// single-lane keeps resource usage predictable on shared hosts.
const MEMORY_COST_KIB: u32 = 19 * 1024;
const PARALLELISM: u32 = 1;

/// Password hashing implementation.
///
/// Provides cryptographic password hashing (internally uses Argon2id).
/// The time cost is the single externally configurable work factor; it is
/// embedded in every hash the instance produces, so hashes minted under an
/// older cost remain verifiable after the configured default changes.
pub struct PasswordHasher {
    argon2: Argon2<'static>,
}

impl PasswordHasher {
    /// Create a password hasher with the given time cost (iterations).
    ///
    /// # Arguments
    /// * `time_cost` - Work factor, must be within `MIN_TIME_COST..=MAX_TIME_COST`
    ///
    /// # Errors
    /// * `InvalidCost` - Time cost outside the accepted range
    /// * `HashingFailed` - Parameter combination rejected by the algorithm
    pub fn new(time_cost: u32) -> Result<Self, PasswordError> {
        if !(MIN_TIME_COST..=MAX_TIME_COST).contains(&time_cost) {
            return Err(PasswordError::InvalidCost {
                min: MIN_TIME_COST,
                max: MAX_TIME_COST,
                actual: time_cost,
            });
        }

        let params = Params::new(MEMORY_COST_KIB, time_cost, PARALLELISM, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash a plaintext password securely.
    ///
    /// Uses Argon2id with a fresh random salt per call, so two hashes of the
    /// same password never compare equal.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to hash
    ///
    /// # Returns
    /// PHC string format hash (includes algorithm, parameters, salt, and digest)
    ///
    /// # Errors
    /// * `TooLong` - Plaintext exceeds `MAX_PASSWORD_BYTES`
    /// * `HashingFailed` - Random source or hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        check_length(password)?;

        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored hash.
    ///
    /// Verification parameters are read from the hash string itself, not
    /// from this instance, so historical hashes stay verifiable after the
    /// configured cost changes. The digest comparison is constant-time; a
    /// wrong password is a valid `false` result, never an error.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `hash` - Stored password hash in PHC string format
    ///
    /// # Returns
    /// True if password matches, false otherwise
    ///
    /// # Errors
    /// * `TooLong` - Plaintext exceeds `MAX_PASSWORD_BYTES`
    /// * `VerificationFailed` - Hash is malformed or uses an unknown algorithm
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        check_length(password)?;

        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(PasswordError::VerificationFailed(e.to_string())),
        }
    }
}

fn check_length(password: &str) -> Result<(), PasswordError> {
    let length = password.len();
    if length > MAX_PASSWORD_BYTES {
        return Err(PasswordError::TooLong {
            max: MAX_PASSWORD_BYTES,
            actual: length,
        });
    }
    Ok(())
}
