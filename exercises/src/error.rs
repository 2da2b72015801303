use exercise_api::{endpoints::ValidationError, ExerciseApiError};
use exercise_auth::{AuthClientError, AuthError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// Bad input caught before anything was sent.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// No session, or the session expired and could not be refreshed.
    #[error("Not logged in or session expired. Please log in again.")]
    Unauthenticated,

    #[error("Login failed: {0}")]
    InvalidCredentials(String),

    #[error("No refresh token available")]
    NoRefreshToken,

    #[error("Token refresh failed: {0}")]
    RefreshRejected(String),

    /// Any non-2xx response; `message` is the backend's, verbatim.
    #[error("{message} (HTTP {status})")]
    Upstream { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),
}

impl ClientError {
    /// Errors after which the user has to log in again.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated | Self::NoRefreshToken | Self::RefreshRejected(_)
        )
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err.message().to_string())
    }
}

impl From<ExerciseApiError> for ClientError {
    fn from(err: ExerciseApiError) -> Self {
        match err {
            ExerciseApiError::Api(status, message) => ClientError::Upstream {
                status: status.as_u16(),
                message,
            },
            ExerciseApiError::Internal(e) => ClientError::Network(e.to_string()),
            e @ ExerciseApiError::Timeout(_) => ClientError::Network(e.to_string()),
        }
    }
}

impl From<AuthClientError> for ClientError {
    fn from(err: AuthClientError) -> Self {
        match err {
            AuthClientError::Rejected(status, message) => ClientError::Upstream {
                status: status.as_u16(),
                message,
            },
            AuthClientError::Http(e) => ClientError::Network(e.to_string()),
        }
    }
}

impl From<AuthError> for ClientError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthClient(e) => e.into(),
            e => ClientError::TokenStorage(e.to_string()),
        }
    }
}
