use crate::model::credential::CredentialDelta;
use crate::model::hasher;
use crate::model::session::SessionToken;
use crate::store::SaveCondition;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Voluntary password change for an authenticated user.
///
/// The current password must verify first - holding a session token alone is
/// not enough to overwrite a password. A successful change also clears any
/// outstanding reset code and refreshes the session token.
///
pub async fn change_password(ctx: &ServiceContext, user_id: &str, current_plain_text: &str, new_plain_text: &str)
    -> Result<SessionToken, WardenError> {

    let credential = ctx.store().find_by_identity(user_id).await?
        .ok_or_else(|| ErrorCode::UserNotFound.with_msg("The user requested does not exist"))?;

    let phc = credential.password_phc.clone();
    let current_plain_text = current_plain_text.to_string();
    let valid = tokio::task::spawn_blocking(move || { hasher::validate(&current_plain_text, &phc) })
        .await
        .map_err(WardenError::from)?
        ?;

    if !valid {
        return Err(ErrorCode::InvalidCredentials.with_msg("The current password is incorrect"))
    }

    let new_plain_text = new_plain_text.to_string();
    let phc = tokio::task::spawn_blocking(move || { hasher::hash_into_phc(&new_plain_text) })
        .await
        .map_err(WardenError::from)?
        ?;

    ctx.store().save(
        &credential.user_id,
        CredentialDelta::password_changed(&phc),
        SaveCondition::ResetExpiryEquals(credential.reset_token_expires)).await?;

    ctx.signer().issue(&credential.user_id, ctx.now())
}
