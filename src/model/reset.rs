use rand::Rng;
use chrono::{DateTime, Duration, Utc};
use crate::model::credential::{ResetFields, UserCredential};
use crate::model::hasher;
use crate::utils::errors::{ErrorCode, WardenError};

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const RESET_CODE_LEN: usize = 32;

///
/// Issues and consumes single-use, time-limited password-reset codes.
///
/// Only the SHA-256 digest of a code is ever persisted; the plain text goes
/// back to the caller once, for out-of-band delivery, and is then gone.
///
pub struct ResetTokenManager {
    window: Duration,
}

impl ResetTokenManager {
    pub fn new(window_seconds: i64) -> Self {
        ResetTokenManager { window: Duration::seconds(window_seconds) }
    }

    ///
    /// Generate a fresh reset code. Returns the plain text for delivery and
    /// the digest+expiry pair to persist. Persisting over an existing pair
    /// invalidates the previous code - overwrite, never append.
    ///
    pub fn issue(&self, now: DateTime<Utc>) -> (String, ResetFields) {
        let plain_text = generate_reset_code();

        let fields = ResetFields {
            token_hash: hasher::digest(&plain_text),
            expires_at: now + self.window,
        };

        (plain_text, fields)
    }

    ///
    /// Check a presented code against the credential's stored reset fields.
    ///
    /// Match is checked before expiry, so a wrong code on a lapsed entry is
    /// still just ResetTokenInvalid. The caller must persist the cleared
    /// fields atomically with the new password hash.
    ///
    pub fn consume(&self, presented: &str, credential: &UserCredential, now: DateTime<Utc>)
        -> Result<(), WardenError> {

        let (stored_hash, expires_at) = match (&credential.reset_token_hash, &credential.reset_token_expires) {
            (Some(hash), Some(expires)) => (hash, expires),
            _ => return Err(ErrorCode::ResetTokenInvalid
                .with_msg("There is no password reset outstanding for this account")),
        };

        let presented_hash = hasher::digest(presented);
        if !hasher::constant_time_eq(presented_hash.as_bytes(), stored_hash.as_bytes()) {
            return Err(ErrorCode::ResetTokenInvalid.with_msg("The reset code is not valid"))
        }

        if now > *expires_at {
            return Err(ErrorCode::ResetTokenExpired
                .with_msg("The period to reset the password has expired, you must initiate the process again"))
        }

        Ok(())
    }
}

fn generate_reset_code() -> String {
    let mut rng = rand::thread_rng();
    (0..RESET_CODE_LEN)
        .map(|_| {
            let idx = rng.gen_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}
