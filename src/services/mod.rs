mod change_password;
mod complete_reset;
mod enrol;
mod login;
mod logout;
mod start_reset;

use tracing::instrument;
use crate::model::session::{SessionCookie, SessionToken};
use crate::utils::context::ServiceContext;
use crate::utils::errors::WardenError;

///
/// The credential operations. Each is an independent, short-lived unit of
/// work - the context holds no lock across the store and hashing calls, so
/// any number may run concurrently, including against the same user. Races
/// on a user's reset fields are decided by the store's conditional save.
///
impl ServiceContext {
    #[instrument(skip(self, plain_text_password))]
    pub async fn enrol(&self, email: &str, plain_text_password: &str) -> Result<(String, SessionToken), WardenError> {
        enrol::enrol(self, email, plain_text_password).await
    }

    #[instrument(skip(self, plain_text_password))]
    pub async fn login(&self, email: &str, plain_text_password: &str) -> Result<SessionToken, WardenError> {
        login::login(self, email, plain_text_password).await
    }

    ///
    /// Verify a presented session token and return the identity it binds.
    ///
    #[instrument(skip(self, token))]
    pub fn verify_session(&self, token: &str) -> Result<String, WardenError> {
        self.signer().verify(token, self.now())
    }

    #[instrument(skip(self))]
    pub async fn start_reset(&self, email: &str) -> Result<String, WardenError> {
        start_reset::start_reset(self, email).await
    }

    #[instrument(skip(self, presented_code, new_plain_text_password))]
    pub async fn complete_reset(&self, presented_code: &str, new_plain_text_password: &str) -> Result<SessionToken, WardenError> {
        complete_reset::complete_reset(self, presented_code, new_plain_text_password).await
    }

    #[instrument(skip(self, current_plain_text, new_plain_text))]
    pub async fn change_password(&self, user_id: &str, current_plain_text: &str, new_plain_text: &str) -> Result<SessionToken, WardenError> {
        change_password::change_password(self, user_id, current_plain_text, new_plain_text).await
    }

    pub fn logout(&self) -> SessionCookie {
        logout::logout(self)
    }
}
