use std::sync::Arc;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use crate::model::reset::ResetTokenManager;
use crate::model::session::TokenSigner;
use crate::store::UserRecordStore;
use super::config::Configuration;
use super::errors::WardenError;
use super::time_provider::TimeProvider;

///
/// The context gives every credential operation access to the record store,
/// the token signer, the reset manager and the service clock.
///
/// All of it is immutable after construction apart from the clock, which
/// tests may fix - so any number of operations can share one context.
///
pub struct ServiceContext {
    config: Configuration,
    store: Arc<dyn UserRecordStore>,
    signer: TokenSigner,
    reset_manager: ResetTokenManager,
    time_provider: RwLock<TimeProvider>,
}

impl ServiceContext {
    pub fn new(config: Configuration, store: Arc<dyn UserRecordStore>) -> Result<Self, WardenError> {
        let signer = TokenSigner::new(&config)?;
        let reset_manager = ResetTokenManager::new(config.reset_token_ttl);

        Ok(ServiceContext {
            config,
            store,
            signer,
            reset_manager,
            time_provider: RwLock::new(TimeProvider::default()),
        })
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn store(&self) -> &dyn UserRecordStore {
        &*self.store
    }

    pub fn signer(&self) -> &TokenSigner {
        &self.signer
    }

    pub fn reset_manager(&self) -> &ResetTokenManager {
        &self.reset_manager
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.time_provider.read().now()
    }

    ///
    /// Set or clear the fixed time - tests use this to step past token
    /// expiry windows.
    ///
    pub fn set_now(&self, now: Option<DateTime<Utc>>) {
        self.time_provider.write().fix(now);
    }
}
