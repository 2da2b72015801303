use reqwest::StatusCode;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RefreshRequest<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug)]
pub enum AuthClientError {
    Http(reqwest::Error),
    /// Non-2xx response with the backend's message.
    Rejected(StatusCode, String),
}

impl std::fmt::Display for AuthClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(e) => write!(f, "HTTP error: {}", e),
            Self::Rejected(status, msg) => write!(f, "({}) {}", status, msg),
        }
    }
}

impl std::error::Error for AuthClientError {}

impl From<reqwest::Error> for AuthClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}
