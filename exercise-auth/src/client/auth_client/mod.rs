mod models;

use crate::common::{Credentials, TokenResponse};
use exercise_api::{endpoints::users::User, ErrorResponse};
pub use models::AuthClientError;
use models::*;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the unauthenticated `/auth/*` endpoints.
pub struct AuthClient {
    http_client: Client,
    server_url: String,
}

impl AuthClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, AuthClientError> {
        Self::with_timeout(server_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AuthClientError> {
        let http_client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            server_url: server_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<User, AuthClientError> {
        let url = format!("{}/auth/register", self.server_url);
        let req = RegisterRequest {
            username,
            password: password.expose_secret(),
        };

        let resp = self.http_client.post(&url).json(&req).send().await?;
        Self::parse::<User>(resp).await
    }

    /// Password login; the body is form-encoded as the token endpoint expects.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Credentials, AuthClientError> {
        let url = format!("{}/auth/token", self.server_url);
        let form = [("username", username), ("password", password.expose_secret())];

        let resp = self.http_client.post(&url).form(&form).send().await?;
        let tokens = Self::parse::<TokenResponse>(resp).await?;
        Ok(tokens.into())
    }

    pub async fn refresh_token(&self, refresh_token: &str) -> Result<Credentials, AuthClientError> {
        let url = format!("{}/auth/refresh", self.server_url);
        let req = RefreshRequest { refresh_token };

        let resp = self.http_client.post(&url).json(&req).send().await?;
        let tokens = Self::parse::<TokenResponse>(resp).await?;
        Ok(tokens.into())
    }

    async fn parse<T: DeserializeOwned>(resp: Response) -> Result<T, AuthClientError> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthClientError::Rejected(
                status,
                ErrorResponse::message_from(&body),
            ));
        }
        Ok(resp.json::<T>().await?)
    }
}

impl AuthClientError {
    /// Status of a rejected call, `None` for transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Rejected(status, _) => Some(*status),
            Self::Http(_) => None,
        }
    }

    /// The backend's message for a rejection, the transport error otherwise.
    pub fn message(&self) -> String {
        match self {
            Self::Rejected(_, message) => message.clone(),
            Self::Http(e) => e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves a single request with `status` and a JSON `body`.
    async fn answer_once(status: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = vec![0; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_refresh_returns_new_pair() {
        let url = answer_once(
            "200 OK",
            r#"{"access_token": "a2", "refresh_token": "r2", "token_type": "bearer"}"#,
        )
        .await;
        let client = AuthClient::new(url).unwrap();

        let credentials = client.refresh_token("r1").await.unwrap();
        assert_eq!(credentials, Credentials::new("a2", "r2"));
    }

    #[tokio::test]
    async fn test_rejection_keeps_backend_detail() {
        let url = answer_once("401 Unauthorized", r#"{"detail": "Invalid refresh token"}"#).await;
        let client = AuthClient::new(url).unwrap();

        let err = client.refresh_token("stale").await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert_eq!(err.message(), "Invalid refresh token");
    }

    #[tokio::test]
    async fn test_unreachable_server_has_no_status() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = AuthClient::new(format!("http://{}", addr)).unwrap();

        let err = client.refresh_token("r").await.unwrap_err();
        assert_eq!(err.status(), None);
    }
}
