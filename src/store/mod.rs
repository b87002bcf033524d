pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use crate::model::credential::{CredentialDelta, UserCredential};
use crate::utils::errors::WardenError;

///
/// The guard for a conditional save. Two racing operations read the same
/// credential, and only the first write whose expectation still holds wins;
/// the loser gets StoreConflict.
///
#[derive(Clone, Debug, PartialEq)]
pub enum SaveCondition {
    Unconditional,

    // Apply only if the stored reset expiry still equals the value read.
    ResetExpiryEquals(Option<DateTime<Utc>>),
}

///
/// The durable home of user credentials - an external collaborator to this
/// core. Implementations must honour SaveCondition with per-record atomicity
/// and surface a bounded-I/O timeout as StoreTimeout rather than hanging.
///
#[async_trait]
pub trait UserRecordStore: Send + Sync {
    ///
    /// Persist a brand new credential. Fails with DuplicateUser if the
    /// identity or email is already taken.
    ///
    async fn create(&self, credential: UserCredential) -> Result<(), WardenError>;

    async fn find_by_identity(&self, user_id: &str) -> Result<Option<UserCredential>, WardenError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredential>, WardenError>;

    ///
    /// Locate the credential holding this reset-token digest. The digest is
    /// the non-secret correlation index - the plain code never reaches the
    /// store.
    ///
    async fn find_by_reset_correlation(&self, token_hash: &str) -> Result<Option<UserCredential>, WardenError>;

    ///
    /// Apply the delta's set fields to the stored record, atomically with the
    /// condition check. Fails with UserNotFound for an unknown identity and
    /// StoreConflict when the condition no longer holds.
    ///
    async fn save(&self, user_id: &str, delta: CredentialDelta, condition: SaveCondition)
        -> Result<(), WardenError>;
}
