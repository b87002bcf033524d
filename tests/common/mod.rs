use std::sync::Arc;
use async_trait::async_trait;
use warden::model::credential::{CredentialDelta, UserCredential};
use warden::store::memory::MemoryStore;
use warden::store::{SaveCondition, UserRecordStore};
use warden::utils::config::Configuration;
use warden::utils::context::ServiceContext;
use warden::utils::errors::WardenError;

pub const EMAIL: &str = "jane@example.com";
pub const PASSWORD: &str = "Hello123!";

pub fn test_config() -> Configuration {
    Configuration {
        session_token_secret: "a-test-signing-secret".to_string(),
        session_token_ttl: 2 * 60 * 60,
        reset_token_ttl: 10 * 60,
        secure_cookie: false,
    }
}

///
/// A context over a fresh in-memory store - every test gets its own world,
/// so they are free to run in parallel.
///
pub fn start_warden() -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(test_config(), Arc::new(MemoryStore::new()))
        .expect("test context should build"))
}

pub fn start_warden_with(store: Arc<dyn UserRecordStore>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(test_config(), store).expect("test context should build"))
}

///
/// The marker password a RivalConfirmStore's rival writes - tests assert the
/// loser never overwrote it.
///
pub const RIVAL_PHC: &str = "$argon2id$rival";

///
/// A store where a rival confirmation lands its own password change and
/// clears the reset fields just before every conditional save, so the
/// calling operation always loses the race.
///
#[derive(Default)]
pub struct RivalConfirmStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl UserRecordStore for RivalConfirmStore {
    async fn create(&self, credential: UserCredential) -> Result<(), WardenError> {
        self.inner.create(credential).await
    }

    async fn find_by_identity(&self, user_id: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_identity(user_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_reset_correlation(&self, token_hash: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_reset_correlation(token_hash).await
    }

    async fn save(&self, user_id: &str, delta: CredentialDelta, condition: SaveCondition)
        -> Result<(), WardenError> {
        if let SaveCondition::ResetExpiryEquals(Some(_)) = condition {
            self.inner.save(user_id, CredentialDelta::password_changed(RIVAL_PHC), SaveCondition::Unconditional).await?;
        }
        self.inner.save(user_id, delta, condition).await
    }
}

///
/// A store that refuses to persist reset fields but accepts everything else -
/// used to prove the compensating clear on a failed reset-request.
///
#[derive(Default)]
pub struct ResetRejectingStore {
    pub inner: MemoryStore,
}

#[async_trait]
impl UserRecordStore for ResetRejectingStore {
    async fn create(&self, credential: UserCredential) -> Result<(), WardenError> {
        self.inner.create(credential).await
    }

    async fn find_by_identity(&self, user_id: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_identity(user_id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_email(email).await
    }

    async fn find_by_reset_correlation(&self, token_hash: &str) -> Result<Option<UserCredential>, WardenError> {
        self.inner.find_by_reset_correlation(token_hash).await
    }

    async fn save(&self, user_id: &str, delta: CredentialDelta, condition: SaveCondition)
        -> Result<(), WardenError> {
        if delta.reset_fields.is_some() {
            return Err(warden::ErrorCode::StoreError.with_msg("Simulated write failure"))
        }
        self.inner.save(user_id, delta, condition).await
    }
}
