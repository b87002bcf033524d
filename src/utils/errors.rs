use config::ConfigError;
use derive_more::Display;
use tokio::task::JoinError;

#[derive(Clone, Copy, Debug, Display, PartialEq)]
pub enum ErrorCode {
    ConfigurationInvalid    = 0500,
    HashingError            = 0509,
    InvalidPHCFormat        = 0510,
    HashThreadingIssue      = 0511,
    InvalidJSON             = 0512,
    StoreError              = 0520,
    StoreConflict           = 0521,
    StoreTimeout            = 0522,
    InvalidCredentials      = 2100,
    UserNotFound            = 2101,
    DuplicateUser           = 2102,
    TokenInvalid            = 2110,
    TokenExpired            = 2111,
    ResetTokenInvalid       = 2200,
    ResetTokenExpired       = 2201,
}

impl ErrorCode {
    pub fn with_msg(&self, message: &str) -> WardenError {
        WardenError::new(*self, message)
    }

    ///
    /// Codes in the 05xx range are infrastructure failures - they must never
    /// reach an end user as-is.
    ///
    pub fn is_internal(&self) -> bool {
        (*self as u32) < 1000
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WardenError {
    error_code: ErrorCode,
    message: String,
}

impl WardenError {
    pub fn new(error_code: ErrorCode, message: &str) -> Self {
        WardenError { error_code, message: message.to_string() }
    }

    pub fn error_code(&self) -> ErrorCode {
        self.error_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for WardenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}: {}", self.error_code as u32, self.message)
    }
}

impl std::error::Error for WardenError {}

impl From<ConfigError> for WardenError {
    fn from(error: ConfigError) -> Self {
        ErrorCode::ConfigurationInvalid.with_msg(&format!("The service configuration is not correct: {}", error))
    }
}

impl From<argon2::Error> for WardenError {
    fn from(error: argon2::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Invalid configuration for algorithm: {}", error))
    }
}

impl From<argon2::password_hash::Error> for WardenError {
    fn from(error: argon2::password_hash::Error) -> Self {
        ErrorCode::HashingError.with_msg(&format!("Unable to hash secret: {}", error))
    }
}

impl From<serde_json::Error> for WardenError {
    fn from(error: serde_json::Error) -> Self {
        ErrorCode::InvalidJSON.with_msg(&format!("Unable to convert to json: {}", error))
    }
}

impl From<JoinError> for WardenError {
    fn from(error: JoinError) -> Self {
        ErrorCode::HashThreadingIssue.with_msg(&format!("Unable to hash: {}", error))
    }
}

///
/// Signature problems are reported distinctly from expiry so tampering shows
/// up as TokenInvalid in diagnostics, never as a mere TokenExpired.
///
impl From<jsonwebtoken::errors::Error> for WardenError {
    fn from(error: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match error.kind() {
            ErrorKind::ExpiredSignature => ErrorCode::TokenExpired.with_msg("The session token has expired"),
            _ => ErrorCode::TokenInvalid.with_msg(&format!("The session token could not be verified: {}", error)),
        }
    }
}
