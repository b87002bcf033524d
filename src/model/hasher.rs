use sha2::{Digest, Sha256};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use crate::utils::errors::{ErrorCode, WardenError};

///
/// A well-formed hash at the default cost parameters that matches no known
/// secret. Lookup paths that miss validate against this instead of returning
/// early, so a missing account costs the caller the same as a mismatch.
///
pub const DECOY_PHC: &str = "$argon2id$v=19$m=19456,t=2,p=1$77QFGJMDLMwvR7+lYvuNtw$82Byd2enomP62Z01Wcb1g5+KApYhQygW6BEYCXnZj5A";

///
/// One-way hash the plain-text secret into a PHC string ($argon2id$v=19$...).
///
/// A fresh random salt is generated per call, so hashing the same secret twice
/// yields different PHC strings - comparison must go through validate().
///
pub fn hash_into_phc(plain_text: &str) -> Result<String, WardenError> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default().hash_password(plain_text.as_bytes(), &salt)?;
    Ok(phc.to_string())
}

///
/// Validate if the plain-text secret matches the PHC-encoded hash provided.
///
/// A mismatch is a normal boolean outcome. An error is only returned when the
/// PHC string itself cannot be parsed or the algorithm fails.
///
pub fn validate(plain_text: &str, phc: &str) -> Result<bool, WardenError> {
    let parsed = PasswordHash::new(phc)
        .map_err(|e| ErrorCode::InvalidPHCFormat.with_msg(&format!("The stored hash is not a valid PHC string: {}", e)))?;

    match Argon2::default().verify_password(plain_text.as_bytes(), &parsed) {
        Ok(())  => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(other) => Err(other.into()),
    }
}

///
/// A SHA-256 hex digest - used as the one-way stored form of a reset code.
///
/// Unlike passwords, reset codes are high-entropy random strings, so a plain
/// digest (no salt) is sufficient and doubles as the correlation index the
/// store can look a presented code up by.
///
pub fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}

///
/// Compare two byte strings without short-circuiting on the first mismatch.
///
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false
    }

    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
