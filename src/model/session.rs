use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use crate::utils::config::Configuration;
use crate::utils::errors::{ErrorCode, WardenError};

///
/// The signed claim set carried inside a session token.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,  // The user's opaque identity.
    pub iat: i64,     // Issued-at, unix seconds.
    pub exp: i64,     // Expiry, unix seconds.
}

///
/// An issued session token - the string is opaque to callers and safe to hand
/// to the transport layer as a cookie or bearer value.
///
#[derive(Clone, Debug)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl SessionToken {
    pub fn into_cookie(self, secure: bool) -> SessionCookie {
        SessionCookie {
            value: self.token,
            expires_at: self.expires_at,
            http_only: true,
            secure,
        }
    }
}

///
/// Cookie advice for the transport layer - this core never sets cookies itself.
///
#[derive(Clone, Debug)]
pub struct SessionCookie {
    pub value: String,
    pub expires_at: DateTime<Utc>,
    pub http_only: bool,
    pub secure: bool,
}

impl SessionCookie {
    ///
    /// A short-lived overwrite cookie instructing the client to discard its
    /// session token.
    ///
    pub fn cleared(now: DateTime<Utc>, secure: bool) -> Self {
        SessionCookie {
            value: "none".to_string(),
            expires_at: now + Duration::seconds(10),
            http_only: true,
            secure,
        }
    }
}

///
/// Issues and verifies HS256-signed session tokens.
///
/// The signing secret is process-wide, injected once at construction, and has
/// no accessor - nothing downstream can read or log it.
///
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(config: &Configuration) -> Result<Self, WardenError> {
        if config.session_token_secret.is_empty() {
            return Err(ErrorCode::ConfigurationInvalid
                .with_msg("SESSION_TOKEN_SECRET must be set to a non-empty value"))
        }

        let mut validation = Validation::new(Algorithm::HS256);

        // Expiry is checked against the service clock after the signature has
        // been verified, so that tests can time-travel past a token's ttl.
        validation.validate_exp = false;

        Ok(TokenSigner {
            encoding_key: EncodingKey::from_secret(config.session_token_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.session_token_secret.as_bytes()),
            validation,
            ttl: Duration::seconds(config.session_token_ttl),
        })
    }

    ///
    /// Bind the identity into a signed token expiring ttl from now.
    ///
    pub fn issue(&self, identity: &str, now: DateTime<Utc>) -> Result<SessionToken, WardenError> {
        let expires_at = now + self.ttl;

        let claims = Claims {
            sub: identity.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;

        Ok(SessionToken { token, expires_at })
    }

    ///
    /// Verify the token and return the identity it was issued to.
    ///
    /// The signature is checked first: a tampered token is TokenInvalid even
    /// if its claimed expiry has also passed.
    ///
    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<String, WardenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;

        if data.claims.exp < now.timestamp() {
            return Err(ErrorCode::TokenExpired.with_msg("The session token has expired"))
        }

        Ok(data.claims.sub)
    }
}
