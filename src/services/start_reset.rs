use crate::model::credential::CredentialDelta;
use crate::store::SaveCondition;
use crate::utils::context::ServiceContext;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// Begin a password reset: generate a single-use code, persist its digest and
/// expiry, and hand the plain-text code back for out-of-band delivery.
///
/// Issuing overwrites any outstanding code, so a previously leaked code stops
/// working the moment a fresh reset is requested.
///
pub async fn start_reset(ctx: &ServiceContext, email: &str) -> Result<String, WardenError> {

    let credential = ctx.store().find_by_email(email).await?
        .ok_or_else(|| ErrorCode::UserNotFound.with_msg("No account exists for this email"))?;

    let (plain_text, fields) = ctx.reset_manager().issue(ctx.now());

    if let Err(failure) = ctx.store()
        .save(&credential.user_id, CredentialDelta::reset_issued(fields), SaveCondition::Unconditional)
        .await {

        // Compensate so a partial write cannot leave a half-formed reset pair.
        if let Err(clear_failure) = ctx.store()
            .save(&credential.user_id, CredentialDelta::reset_cleared(), SaveCondition::Unconditional)
            .await {
            tracing::warn!(user_id = %credential.user_id,
                "Failed to clear reset fields after a failed write: {}", clear_failure);
        }

        return Err(failure)
    }

    Ok(plain_text)
}
