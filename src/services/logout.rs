use crate::model::session::SessionCookie;
use crate::utils::context::ServiceContext;

///
/// Logout is stateless - there is no server-side session table to mutate.
/// The caller is handed a short-lived overwrite cookie telling the client to
/// discard its token.
///
pub fn logout(ctx: &ServiceContext) -> SessionCookie {
    SessionCookie::cleared(ctx.now(), ctx.config().secure_cookie)
}
