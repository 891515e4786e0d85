//! Small helper functions shared across the engine.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::traits::UserApiError;

/// The minimal deliverability check the checkout flow applies to a purchaser email before attempting to send a
/// confirmation. Anything without an `@` is treated as unusable and skipped, not rejected.
pub fn email_looks_deliverable(email: &str) -> bool {
    email.contains('@')
}

/// Hashes a password into an argon2id PHC string with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, UserApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| UserApiError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verifies a password against a stored PHC string. A mismatch is [`UserApiError::WrongPassword`]; a hash that
/// cannot even be parsed is a [`UserApiError::PasswordHash`] error, since it means the stored data is corrupt.
pub fn verify_password(password: &str, hash: &str) -> Result<(), UserApiError> {
    let parsed = PasswordHash::new(hash).map_err(|e| UserApiError::PasswordHash(e.to_string()))?;
    Argon2::default().verify_password(password.as_bytes(), &parsed).map_err(|_| UserApiError::WrongPassword)
}
