pub mod endpoints;
mod error;
mod macros;
pub mod repositories;

pub use crate::error::{ErrorResponse, ExerciseApiError};
use repositories::*;
use std::future::Future;
use std::time::Duration;
pub use tower_api_client::{Method, Request as ApiRequest, RequestData, StatusCode};
use tower_api_client::Client as ApiClient;

const DEFAULT_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// The capability to send one request with a given bearer token.
///
/// The session layer wraps this to add refresh-and-retry; implementations must
/// not retry on their own.
pub trait Transport: Send + Sync {
    fn send<R>(
        &self,
        access_token: &str,
        request: R,
    ) -> impl Future<Output = Result<R::Response, ExerciseApiError>>
    where
        R: ApiRequest;
}

/// Transport over HTTP against the exercise backend.
///
/// Holds one client whose connection pool is shared by every request; each
/// send works on a clone carrying that request's bearer token.
#[derive(Clone)]
pub struct HttpTransport {
    client: ApiClient,
    base_url: String,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: ApiClient::new(base_url.as_str()),
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Transport for HttpTransport {
    async fn send<R>(&self, access_token: &str, request: R) -> Result<R::Response, ExerciseApiError>
    where
        R: ApiRequest,
    {
        let client = self.client.clone().bearer_auth(access_token);
        match tokio::time::timeout(self.timeout, client.send(request)).await {
            Ok(result) => result.map_err(From::from),
            Err(_) => Err(ExerciseApiError::Timeout(self.timeout)),
        }
    }
}

pub struct Request;

impl Request {
    pub fn new() -> Self {
        Self {}
    }

    pub fn exercises() -> ExerciseRepository {
        ExerciseRepository::new()
    }

    pub fn ratings() -> RatingRepository {
        RatingRepository::new()
    }

    pub fn users() -> UserRepository {
        UserRepository::new()
    }
}
