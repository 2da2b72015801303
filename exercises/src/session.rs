use crate::error::ClientError;
use exercise_api::{endpoints::users::User, ApiRequest, HttpTransport, Transport};
use exercise_auth::{AuthClient, Claims, Credentials, SecretString, TokenStorage};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Where the session stands. Always mirrors the token store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    NoSession,
    Active(Credentials),
}

/// Owns the credentials and wraps every authorized call.
///
/// A request rejected with 401 triggers one refresh and one retry with the
/// new token; whatever the retry returns is the result. A failed refresh ends
/// the session. Refreshes are single-flight: a request whose token was already
/// replaced by a concurrent refresh retries with the replacement instead of
/// refreshing again.
pub struct SessionManager<T = HttpTransport> {
    transport: T,
    auth: AuthClient,
    store: Box<dyn TokenStorage>,
    state: Mutex<SessionState>,
    refresh_gate: tokio::sync::Mutex<()>,
}

impl<T: Transport> SessionManager<T> {
    /// Starts `Active` when the store holds a pair, `NoSession` otherwise.
    pub fn new(transport: T, auth: AuthClient, store: Box<dyn TokenStorage>) -> Self {
        let state = match store.load() {
            Ok(Some(credentials)) if !credentials.access_token.is_empty() => {
                tracing::debug!("Restored session from token store");
                SessionState::Active(credentials)
            }
            Ok(_) => SessionState::NoSession,
            Err(e) => {
                tracing::warn!("Ignoring unreadable token store: {}", e);
                SessionState::NoSession
            }
        };

        Self {
            transport,
            auth,
            store,
            state: Mutex::new(state),
            refresh_gate: tokio::sync::Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn state(&self) -> SessionState {
        self.lock_state().clone()
    }

    pub fn is_active(&self) -> bool {
        matches!(*self.lock_state(), SessionState::Active(_))
    }

    /// Claims of the current access token, if there is one and it decodes.
    pub fn current_user(&self) -> Option<Claims> {
        self.credentials()
            .and_then(|credentials| Claims::decode(&credentials.access_token))
    }

    pub async fn register(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<User, ClientError> {
        tracing::info!("Registering user {}", username);
        Ok(self.auth.register(username, password).await?)
    }

    /// Exchanges a password for a token pair. The store is only written on
    /// success.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<Credentials, ClientError> {
        tracing::info!("Logging in as {}", username);

        let credentials = self
            .auth
            .login(username, password)
            .await
            .map_err(|e| match e.status().map(|s| s.as_u16()) {
                Some(400) | Some(401) => ClientError::InvalidCredentials(e.message()),
                _ => ClientError::from(e),
            })?;

        self.install(credentials.clone())?;
        tracing::info!("Logged in");
        Ok(credentials)
    }

    pub async fn refresh(&self) -> Result<Credentials, ClientError> {
        let _gate = self.refresh_gate.lock().await;
        self.refresh_locked().await
    }

    /// Always succeeds in ending the in-memory session; a store that cannot be
    /// cleared is reported but does not keep the session alive.
    pub fn logout(&self) -> Result<(), ClientError> {
        tracing::info!("Logging out");
        self.discard()
    }

    /// Sends `request` with the current access token, refreshing and retrying
    /// once if the backend answers 401.
    pub async fn authorized_request<R>(&self, request: R) -> Result<R::Response, ClientError>
    where
        R: ApiRequest + Clone,
    {
        let token = self
            .credentials()
            .map(|credentials| credentials.access_token)
            .ok_or(ClientError::Unauthenticated)?;

        tracing::debug!("{} {}", R::METHOD, request.endpoint());

        match self.transport.send(&token, request.clone()).await {
            Err(e) if e.is_unauthorized() => {
                tracing::info!("Access token rejected for {}, refreshing", request.endpoint());
            }
            result => return result.map_err(ClientError::from),
        }

        let token = self.token_after_rejection(&token).await?;

        tracing::debug!("Retrying {} {}", R::METHOD, request.endpoint());
        self.transport
            .send(&token, request)
            .await
            .map_err(ClientError::from)
    }

    /// Gets a usable token after `rejected` was refused, refreshing at most
    /// once across all requests that saw the same rejected token.
    async fn token_after_rejection(&self, rejected: &str) -> Result<String, ClientError> {
        let _gate = self.refresh_gate.lock().await;

        match self.credentials() {
            None => return Err(ClientError::Unauthenticated),
            Some(current) if current.access_token != rejected => {
                tracing::debug!("Session was refreshed concurrently, reusing new token");
                return Ok(current.access_token);
            }
            Some(_) => {}
        }

        match self.refresh_locked().await {
            Ok(credentials) => Ok(credentials.access_token),
            Err(e) => {
                tracing::warn!("Session refresh failed: {}", e);
                Err(ClientError::Unauthenticated)
            }
        }
    }

    // Caller holds `refresh_gate`. The outcome only touches the session if it
    // still holds the refresh token that was exchanged; a logout or login that
    // lands while the exchange is in flight wins.
    async fn refresh_locked(&self) -> Result<Credentials, ClientError> {
        let refresh_token = self
            .credentials()
            .map(|credentials| credentials.refresh_token)
            .ok_or(ClientError::NoRefreshToken)?;

        if refresh_token.is_empty() {
            tracing::warn!("Session has no refresh token, ending it");
            if let Err(e) = self.discard_if_current(&refresh_token) {
                tracing::error!("Failed to clear token store: {}", e);
            }
            return Err(ClientError::NoRefreshToken);
        }

        match self.auth.refresh_token(&refresh_token).await {
            Ok(credentials) => {
                if !self.install_if_current(&refresh_token, credentials.clone())? {
                    tracing::info!("Session changed during refresh, dropping new tokens");
                    return Err(ClientError::Unauthenticated);
                }
                tracing::info!("Session refreshed");
                Ok(credentials)
            }
            Err(e) => {
                if let Err(clear_err) = self.discard_if_current(&refresh_token) {
                    tracing::error!("Failed to clear token store: {}", clear_err);
                }
                Err(ClientError::RefreshRejected(e.to_string()))
            }
        }
    }

    fn credentials(&self) -> Option<Credentials> {
        match &*self.lock_state() {
            SessionState::Active(credentials) => Some(credentials.clone()),
            SessionState::NoSession => None,
        }
    }

    fn install(&self, credentials: Credentials) -> Result<(), ClientError> {
        let mut state = self.lock_state();
        self.store.save(&credentials)?;
        *state = SessionState::Active(credentials);
        Ok(())
    }

    /// Replaces the session with `credentials` if it still holds `exchanged`
    /// as its refresh token. A failed save ends the session.
    fn install_if_current(
        &self,
        exchanged: &str,
        credentials: Credentials,
    ) -> Result<bool, ClientError> {
        let mut state = self.lock_state();
        if !holds_refresh_token(&state, exchanged) {
            return Ok(false);
        }
        if let Err(e) = self.store.save(&credentials) {
            *state = SessionState::NoSession;
            if let Err(clear_err) = self.store.clear() {
                tracing::error!("Failed to clear token store: {}", clear_err);
            }
            return Err(e.into());
        }
        *state = SessionState::Active(credentials);
        Ok(true)
    }

    fn discard(&self) -> Result<(), ClientError> {
        let mut state = self.lock_state();
        *state = SessionState::NoSession;
        self.store.clear().map_err(ClientError::from)
    }

    /// Ends the session if it still holds `exchanged` as its refresh token.
    fn discard_if_current(&self, exchanged: &str) -> Result<(), ClientError> {
        let mut state = self.lock_state();
        if !holds_refresh_token(&state, exchanged) {
            return Ok(());
        }
        *state = SessionState::NoSession;
        self.store.clear().map_err(ClientError::from)
    }

    fn lock_state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn holds_refresh_token(state: &SessionState, refresh_token: &str) -> bool {
    matches!(state, SessionState::Active(current) if current.refresh_token == refresh_token)
}
