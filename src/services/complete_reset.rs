use crate::model::credential::CredentialDelta;
use crate::model::hasher;
use crate::model::session::SessionToken;
use crate::store::SaveCondition;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Complete a password reset: consume the presented code, store the new
/// password hash and issue a fresh session token.
///
/// The record is located by the code's digest - the correlation index - so
/// the plain code is never sent to the store. The new hash and the cleared
/// reset fields land in one conditional write; if a concurrent confirmation
/// got there first our condition no longer holds and the code is reported
/// invalid, keeping the code single-use.
///
pub async fn complete_reset(ctx: &ServiceContext, presented_code: &str, new_plain_text_password: &str)
    -> Result<SessionToken, WardenError> {

    let correlation = hasher::digest(presented_code);

    let credential = match ctx.store().find_by_reset_correlation(&correlation).await? {
        Some(credential) => credential,
        None => return Err(ErrorCode::ResetTokenInvalid.with_msg("The reset code is not valid")),
    };

    // Re-checks the digest (constant-time) and the expiry window.
    ctx.reset_manager().consume(presented_code, &credential, ctx.now())?;

    // Hash the new password in a blocking thread.
    let new_plain_text_password = new_plain_text_password.to_string();
    let phc = tokio::task::spawn_blocking(move || { hasher::hash_into_phc(&new_plain_text_password) })
        .await
        .map_err(WardenError::from)?
        ?;

    let result = ctx.store().save(
        &credential.user_id,
        CredentialDelta::password_changed(&phc),
        SaveCondition::ResetExpiryEquals(credential.reset_token_expires)).await;

    if let Err(failure) = result {
        if failure.error_code() == ErrorCode::StoreConflict {
            tracing::warn!(user_id = %credential.user_id, "Reset confirmation lost a concurrent race");
            return Err(ErrorCode::ResetTokenInvalid.with_msg("The reset code is not valid"))
        }

        return Err(failure)
    }

    ctx.signer().issue(&credential.user_id, ctx.now())
}
