pub mod argon2;
pub mod errors;

pub use argon2::PasswordHasher;
pub use argon2::DEFAULT_TIME_COST;
pub use argon2::MAX_PASSWORD_BYTES;
pub use argon2::MAX_TIME_COST;
pub use argon2::MIN_TIME_COST;
pub use errors::PasswordError;
