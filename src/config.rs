//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local
//! development.

use std::env;
use std::path::PathBuf;

/// Default location of the local state file.
pub const DEFAULT_STATE_FILE: &str = ".docportal/state.json";

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portal API (e.g. `http://localhost:8085`)
    pub api_url: String,
    /// JSON file holding local storage (the login flag)
    pub state_file: PathBuf,

    // --- Optional unattended login (binary only) ---
    /// Account email
    pub email: Option<String>,
    /// Account password
    pub password: Option<String>,
    /// One-time code for accounts with MFA enabled
    pub mfa_code: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8085".to_string(),
            state_file: PathBuf::from(DEFAULT_STATE_FILE),
            email: None,
            password: None,
            mfa_code: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_url = env::var("PORTAL_API_URL")
            .map(|v| v.trim().trim_end_matches('/').to_string())
            .map_err(|_| ConfigError::Missing("PORTAL_API_URL"))?;

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(ConfigError::Invalid("PORTAL_API_URL", api_url));
        }

        Ok(Self {
            api_url,
            state_file: env::var("PORTAL_STATE_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE)),
            email: optional("PORTAL_EMAIL"),
            password: optional("PORTAL_PASSWORD"),
            mfa_code: optional("PORTAL_MFA_CODE"),
        })
    }

    /// Credentials for an unattended login, when both are configured.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        Some((self.email.as_deref()?, self.password.as_deref()?))
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
