use std::fmt::Write;
use std::env::VarError;
use config::ConfigError;
use serde::{Deserialize, Serialize};
use super::errors::WardenError;

///
/// The service configuration - initialised at start-up.
///
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    pub session_token_secret: String,  // The HS256 signing key for session tokens. Required, never logged.
    pub session_token_ttl: i64,        // Lifetime of an issued session token in seconds.
    pub reset_token_ttl: i64,          // The window in seconds in which a password-reset code may be used.
    pub secure_cookie: bool,           // Mark issued session cookies as secure-only.
}

impl Configuration {
    ///
    /// Load the service's configuration.
    ///
    pub fn from_env() -> Result<Configuration, ConfigError> {
        let mut cfg = config::Config::default();

        // Merge any environment variables with the same name as the struct fields.
        cfg.merge(config::Environment::new())?;

        // Set defaults for settings that were not specified. No default for
        // session_token_secret - a missing signing key must fail start-up.
        cfg.set_default("session_token_ttl", 2 * 60 * 60)?;
        cfg.set_default("reset_token_ttl", 10 * 60)?;
        cfg.set_default("secure_cookie", false)?;

        let config: Configuration = cfg.try_into()?;

        Ok(config)
    }

    ///
    /// Pretty-print the config with the signing secret redacted.
    ///
    pub fn fmt_console(&self) -> Result<String, WardenError> {
        // Serialise to JSON so we have fields to iterate.
        let values = serde_json::to_value(self)?;

        // Turn into a hashmap.
        let values = values.as_object().expect("No config props");

        // Sort by keys.
        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by_key(|a| a.0);

        let mut output = String::new();
        for (k, v) in sorted {
            match k.as_str() {
                "session_token_secret" => writeln!(&mut output, "{:>23}: \"********\"", k).unwrap(),
                _ => writeln!(&mut output, "{:>23}: {}", k, v).unwrap(),
            }
        }

        Ok(output)
    }
}

///
/// If the specified environment variable is not set for this process, set it to the default value specified.
///
pub fn default_env(key: &str, value: &str) {
    if let Err(VarError::NotPresent) = std::env::var(key) {
        std::env::set_var(key, value);
    }
}
