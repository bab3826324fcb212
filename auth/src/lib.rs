//! Authentication utilities library
//!
//! Provides the password-hashing infrastructure for the identity service:
//! one-way, salted, cost-parameterized hashing (Argon2id) and verification
//! against stored hashes.
//!
//! The service defines its own authentication traits and adapts this
//! implementation. Keeping the hashing primitive in its own crate avoids
//! coupling domain logic to a specific algorithm crate.
//!
//! # Examples
//!
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new(3).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```

pub mod password;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use password::DEFAULT_TIME_COST;
pub use password::MAX_PASSWORD_BYTES;
pub use password::MAX_TIME_COST;
pub use password::MIN_TIME_COST;
