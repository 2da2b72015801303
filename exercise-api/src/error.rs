use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum ExerciseApiError {
    /// Non-2xx response; carries the backend's message verbatim.
    Api(StatusCode, String),
    /// No response within the transport's timeout.
    Timeout(std::time::Duration),
    Internal(ApiError),
}

impl ExerciseApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api(status, _) => Some(*status),
            Self::Timeout(_) | Self::Internal(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }
}

impl From<ApiError> for ExerciseApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, body) | ApiError::ServerError(status, body) => {
                ExerciseApiError::Api(status, ErrorResponse::message_from(&body))
            }
            e => ExerciseApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for ExerciseApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseApiError::Internal(e) => write!(f, "Internal error: {}", e),
            ExerciseApiError::Api(status, message) => write!(f, "({}) {}", status, message),
            ExerciseApiError::Timeout(after) => {
                write!(f, "No response after {}s", after.as_secs_f32())
            }
        }
    }
}

impl std::error::Error for ExerciseApiError {}

/// Error body as produced by the backend: `{"detail": ...}`.
///
/// `detail` is usually a string but validation failures carry a JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// Extracts the user-facing message from a raw error body, falling back
    /// to the body itself when it is not a recognised error document.
    pub fn message_from(body: &str) -> String {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(ErrorResponse {
                detail: serde_json::Value::String(message),
            }) => message,
            Ok(ErrorResponse { detail }) => detail.to_string(),
            Err(_) => body.trim().to_string(),
        }
    }
}
