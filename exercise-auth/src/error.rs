use thiserror::Error;

/// Failures loading settings or touching the persisted session.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    /// The token file exists but does not hold a credentials document.
    #[error("Unreadable token file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    AuthClient(#[from] crate::client::AuthClientError),
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(format!("invalid settings: {}", err))
    }
}
