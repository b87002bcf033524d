use uuid::Uuid;
use crate::model::credential::UserCredential;
use crate::model::hasher;
use crate::model::session::SessionToken;
use crate::utils::context::ServiceContext;
use crate::utils::errors::WardenError;

///
/// Create a credential for a brand new user and sign them straight in.
///
/// Only the PHC hash of the supplied password ever reaches the store.
///
pub async fn enrol(ctx: &ServiceContext, email: &str, plain_text_password: &str)
    -> Result<(String, SessionToken), WardenError> {

    let user_id = Uuid::new_v4().to_string();

    let plain_text_password = plain_text_password.to_string();
    let phc = tokio::task::spawn_blocking(move || { hasher::hash_into_phc(&plain_text_password) })
        .await
        .map_err(WardenError::from)?
        ?;

    ctx.store().create(UserCredential::new(&user_id, email, &phc)).await?;

    tracing::info!(user_id = %user_id, "Enrolled a new user");

    let token = ctx.signer().issue(&user_id, ctx.now())?;
    Ok((user_id, token))
}
