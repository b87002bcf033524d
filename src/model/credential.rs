use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

///
/// The auth-relevant subset of a user record. Owned by the record store;
/// the service borrows one per operation and writes back explicit deltas.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct UserCredential {
    pub user_id: String,
    pub email: String,
    pub password_phc: String,
    pub reset_token_hash: Option<String>,
    pub reset_token_expires: Option<DateTime<Utc>>,
}

impl UserCredential {
    pub fn new(user_id: &str, email: &str, password_phc: &str) -> Self {
        UserCredential {
            user_id: user_id.to_string(),
            email: email.to_string(),
            password_phc: password_phc.to_string(),
            reset_token_hash: None,
            reset_token_expires: None,
        }
    }

    ///
    /// A reset is pending when both reset fields are present and the window
    /// has not closed. The two fields are always written together, so a
    /// half-present pair indicates store corruption, treated as not pending.
    ///
    pub fn reset_pending(&self, now: DateTime<Utc>) -> bool {
        match (&self.reset_token_hash, &self.reset_token_expires) {
            (Some(_), Some(expires)) => now <= *expires,
            _ => false,
        }
    }
}

///
/// The reset fields as a unit, so a hash without an expiry (or vice versa)
/// is unrepresentable in a write.
///
#[derive(Clone, Debug, PartialEq)]
pub struct ResetFields {
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}

///
/// An explicit field delta to persist against a credential. Constructors
/// cover the transitions the service performs; anything a delta leaves None
/// (and doesn't clear) is untouched by the store.
///
#[derive(Clone, Debug, Default)]
pub struct CredentialDelta {
    pub password_phc: Option<String>,
    pub reset_fields: Option<ResetFields>,
    pub clear_reset_fields: bool,
}

impl CredentialDelta {
    ///
    /// A fresh reset code was issued - overwrites any outstanding one.
    ///
    pub fn reset_issued(fields: ResetFields) -> Self {
        CredentialDelta { reset_fields: Some(fields), ..Default::default() }
    }

    ///
    /// Compensating delta: wipe the reset fields, touch nothing else.
    ///
    pub fn reset_cleared() -> Self {
        CredentialDelta { clear_reset_fields: true, ..Default::default() }
    }

    ///
    /// The password changed - any outstanding reset code dies with it.
    ///
    pub fn password_changed(phc: &str) -> Self {
        CredentialDelta {
            password_phc: Some(phc.to_string()),
            clear_reset_fields: true,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use super::*;

    #[test]
    fn test_reset_is_pending_only_inside_the_window() {
        let now = Utc::now();
        let mut credential = UserCredential::new("user-1", "jane@example.com", "$argon2id$stub");
        assert!(!credential.reset_pending(now));

        credential.reset_token_hash = Some("digest".to_string());
        credential.reset_token_expires = Some(now + Duration::seconds(600));

        assert!(credential.reset_pending(now));
        assert!(!credential.reset_pending(now + Duration::seconds(601)));
    }

    #[test]
    fn test_a_half_present_pair_is_not_pending() {
        let now = Utc::now();
        let mut credential = UserCredential::new("user-1", "jane@example.com", "$argon2id$stub");
        credential.reset_token_hash = Some("digest".to_string());

        assert!(!credential.reset_pending(now));
    }

    #[test]
    fn test_password_change_also_clears_the_reset_pair() {
        let delta = CredentialDelta::password_changed("$argon2id$new");
        assert_eq!(delta.password_phc.as_deref(), Some("$argon2id$new"));
        assert_eq!(delta.reset_fields, None);
        assert!(delta.clear_reset_fields);
    }
}
