use crate::model::hasher;
use crate::model::session::SessionToken;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Authenticate an email and password and issue a session token.
///
/// An unknown email and a wrong password surface as the same
/// InvalidCredentials - the caller must not be able to probe which emails
/// have accounts. The distinction lives only in the debug diagnostics.
///
pub async fn login(ctx: &ServiceContext, email: &str, plain_text_password: &str)
    -> Result<SessionToken, WardenError> {

    let credential = match ctx.store().find_by_email(email).await? {
        Some(credential) => credential,
        None => {
            tracing::debug!("Login attempt for an unknown email");

            // Burn a verification against the decoy hash so a miss takes as
            // long as a mismatch - response timing must not reveal which
            // emails have accounts. The outcome is discarded.
            let plain_text_password = plain_text_password.to_string();
            let _ = tokio::task::spawn_blocking(move || { hasher::validate(&plain_text_password, hasher::DECOY_PHC) })
                .await;

            return Err(invalid_credentials())
        },
    };

    // Validating the password is CPU-bound, so it goes to the blocking pool.
    let phc = credential.password_phc.clone();
    let plain_text_password = plain_text_password.to_string();
    let valid = tokio::task::spawn_blocking(move || { hasher::validate(&plain_text_password, &phc) })
        .await
        .map_err(WardenError::from)?
        ?;

    if !valid {
        tracing::debug!(user_id = %credential.user_id, "Login attempt with a wrong password");
        return Err(invalid_credentials())
    }

    ctx.signer().issue(&credential.user_id, ctx.now())
}

fn invalid_credentials() -> WardenError {
    ErrorCode::InvalidCredentials.with_msg("The email and password combination is not valid")
}
