use std::collections::HashMap;
use async_trait::async_trait;
use parking_lot::RwLock;
use crate::model::credential::{CredentialDelta, UserCredential};
use crate::utils::errors::{ErrorCode, WardenError};
use super::{SaveCondition, UserRecordStore};

///
/// An in-process UserRecordStore - the reference implementation of the
/// conditional-save contract, and the store the scenario tests run against.
///
/// The whole map sits behind one RwLock, which trivially gives save() its
/// per-record check-and-apply atomicity.
///
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, UserCredential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRecordStore for MemoryStore {
    async fn create(&self, credential: UserCredential) -> Result<(), WardenError> {
        let mut records = self.records.write();

        if records.contains_key(&credential.user_id)
            || records.values().any(|r| r.email == credential.email) {
            return Err(ErrorCode::DuplicateUser
                .with_msg("A user with this identity or email already exists"))
        }

        records.insert(credential.user_id.clone(), credential);
        Ok(())
    }

    async fn find_by_identity(&self, user_id: &str) -> Result<Option<UserCredential>, WardenError> {
        Ok(self.records.read().get(user_id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredential>, WardenError> {
        Ok(self.records.read().values().find(|r| r.email == email).cloned())
    }

    async fn find_by_reset_correlation(&self, token_hash: &str) -> Result<Option<UserCredential>, WardenError> {
        Ok(self.records.read().values()
            .find(|r| r.reset_token_hash.as_deref() == Some(token_hash))
            .cloned())
    }

    async fn save(&self, user_id: &str, delta: CredentialDelta, condition: SaveCondition)
        -> Result<(), WardenError> {

        let mut records = self.records.write();

        let record = records.get_mut(user_id)
            .ok_or_else(|| ErrorCode::UserNotFound.with_msg("The user requested does not exist"))?;

        if let SaveCondition::ResetExpiryEquals(expected) = condition {
            if record.reset_token_expires != expected {
                return Err(ErrorCode::StoreConflict
                    .with_msg("The credential was modified by a concurrent operation"))
            }
        }

        if let Some(phc) = delta.password_phc {
            record.password_phc = phc;
        }

        if let Some(fields) = delta.reset_fields {
            record.reset_token_hash = Some(fields.token_hash);
            record.reset_token_expires = Some(fields.expires_at);
        } else if delta.clear_reset_fields {
            record.reset_token_hash = None;
            record.reset_token_expires = None;
        }

        Ok(())
    }
}
