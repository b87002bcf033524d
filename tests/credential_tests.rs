mod common;

use chrono::{DateTime, Duration, Utc};
use more_asserts::assert_gt;
use warden::ErrorCode;
use crate::common::{start_warden, EMAIL, PASSWORD};

#[tokio::test]
async fn test_login_with_correct_credentials_issues_a_verifiable_token() {
    let ctx = start_warden();

    let (user_id, _token) = ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    let token = ctx.login(EMAIL, PASSWORD).await.unwrap();
    assert_gt!(token.expires_at, ctx.now());

    // The token verifies back to the same identity.
    assert_eq!(ctx.verify_session(&token.token).unwrap(), user_id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let ctx = start_warden();

    ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    // A wrong password and an unknown email must produce identical errors,
    // otherwise the login endpoint can be used to enumerate accounts.
    let wrong_password = ctx.login(EMAIL, "Hello456!").await.unwrap_err();
    let unknown_email = ctx.login("nobody@example.com", PASSWORD).await.unwrap_err();

    assert_eq!(wrong_password.error_code(), ErrorCode::InvalidCredentials);
    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_enrolling_a_duplicate_email_is_rejected() {
    let ctx = start_warden();

    ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    let status = ctx.enrol(EMAIL, "Other456!").await.unwrap_err();
    assert_eq!(status.error_code(), ErrorCode::DuplicateUser);
}

#[tokio::test]
async fn test_a_session_token_expires_after_its_ttl() {
    let ctx = start_warden();

    ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    // Set the clock to a fixed point in time.
    let issued_at = "2026-08-23T09:30:00Z".parse::<DateTime<Utc>>().unwrap();
    ctx.set_now(Some(issued_at));

    let token = ctx.login(EMAIL, PASSWORD).await.unwrap();

    // Time-travel past the two hour ttl.
    ctx.set_now(Some(issued_at + Duration::hours(2) + Duration::seconds(1)));

    let status = ctx.verify_session(&token.token).unwrap_err();
    assert_eq!(status.error_code(), ErrorCode::TokenExpired);
}

#[tokio::test]
async fn test_change_password_with_wrong_current_password_is_rejected() {
    let ctx = start_warden();

    let (user_id, _token) = ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    let status = ctx.change_password(&user_id, "Hello456!", "Brand-New1!").await.unwrap_err();
    assert_eq!(status.error_code(), ErrorCode::InvalidCredentials);

    // The stored hash is untouched - the original password still logs in.
    assert!(ctx.login(EMAIL, PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_change_password_rotates_the_credential() {
    let ctx = start_warden();

    let (user_id, _token) = ctx.enrol(EMAIL, PASSWORD).await.unwrap();

    let token = ctx.change_password(&user_id, PASSWORD, "Brand-New1!").await.unwrap();
    assert_eq!(ctx.verify_session(&token.token).unwrap(), user_id);

    let status = ctx.login(EMAIL, PASSWORD).await.unwrap_err();
    assert_eq!(status.error_code(), ErrorCode::InvalidCredentials);
    assert!(ctx.login(EMAIL, "Brand-New1!").await.is_ok());
}

#[tokio::test]
async fn test_change_password_for_an_unknown_user_is_not_found() {
    let ctx = start_warden();

    let status = ctx.change_password("no-such-user", PASSWORD, "Brand-New1!").await.unwrap_err();
    assert_eq!(status.error_code(), ErrorCode::UserNotFound);
}

#[tokio::test]
async fn test_logout_advises_the_caller_to_discard_the_token() {
    let ctx = start_warden();

    let cookie = ctx.logout();
    assert_eq!(cookie.value, "none");
    assert!(cookie.http_only);
    assert_gt!(cookie.expires_at, ctx.now());
}
