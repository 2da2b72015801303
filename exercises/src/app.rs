use anyhow::{Context, Result};
use exercise_api::{HttpTransport, Transport};
use exercise_auth::{AuthClient, Settings, TokenStorage, TokenStore};
use std::sync::Arc;

use crate::client::ExerciseClient;
use crate::commands::executor::{execute_command, OutputFormat};
use crate::commands::Command;
use crate::session::SessionManager;

/// Wires settings, token store, session and client together for one run.
pub struct App<T = HttpTransport> {
    client: ExerciseClient<T>,
}

impl App<HttpTransport> {
    /// Loads `Settings` (config file + `EXERCISES__*` env), applying
    /// `server_url` on top when given.
    pub fn from_env(server_url: Option<String>) -> Result<Self> {
        let mut settings = Settings::new().context("Failed to load configuration")?;
        if let Some(server_url) = server_url {
            settings = settings.with_server_url(server_url);
        }

        let store: Box<dyn TokenStorage> = match settings.token_path {
            Some(ref path) => Box::new(TokenStore::at(path)?),
            None => Box::new(TokenStore::new()?),
        };

        Self::new(settings, store)
    }

    pub fn new(settings: Settings, store: Box<dyn TokenStorage>) -> Result<Self> {
        settings
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {}", e))?;

        tracing::info!("Using backend {}", settings.server_url);

        let transport = HttpTransport::new(&settings.server_url).with_timeout(settings.timeout());
        let auth = AuthClient::with_timeout(&settings.server_url, settings.timeout())?;
        Ok(Self::with_transport(transport, auth, store))
    }
}

impl<T: Transport> App<T> {
    pub fn with_transport(transport: T, auth: AuthClient, store: Box<dyn TokenStorage>) -> Self {
        let session = Arc::new(SessionManager::new(transport, auth, store));
        Self {
            client: ExerciseClient::new(session),
        }
    }

    pub fn client(&self) -> &ExerciseClient<T> {
        &self.client
    }

    pub async fn run(&self, command: Command, format: OutputFormat) -> Result<String> {
        execute_command(command, &self.client, format).await
    }
}
