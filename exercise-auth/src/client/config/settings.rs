use crate::AuthError;
use config::{Config, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Overrides the default `<cache_dir>/exercises/token.json`.
    #[serde(default)]
    pub token_path: Option<PathBuf>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            token_path: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, AuthError> {
        let config_path =
            std::env::var("EXERCISES_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("EXERCISES").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    pub fn with_server_url(mut self, server_url: impl Into<String>) -> Self {
        self.server_url = server_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url is required".to_string());
        }
        if !self.server_url.starts_with("http") {
            return Err("server_url must be a valid HTTP(S) URL".to_string());
        }
        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.server_url, "http://localhost:8000");
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(Settings::default().with_server_url("").validate().is_err());
        assert!(Settings::default()
            .with_server_url("ftp://example.com")
            .validate()
            .is_err());

        let settings = Settings {
            timeout_secs: 0,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exercises.toml");
        std::fs::write(
            &path,
            "server_url = \"https://exercises.example.com\"\ntimeout_secs = 3\n",
        )
        .unwrap();

        let settings: Settings = Config::builder()
            .add_source(File::from(path))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.server_url, "https://exercises.example.com");
        assert_eq!(settings.timeout_secs, 3);
        assert!(settings.token_path.is_none());
    }
}
