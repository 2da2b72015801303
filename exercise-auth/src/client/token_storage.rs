use crate::common::Credentials;
use crate::error::AuthError;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

/// Where the session's credentials live between runs.
///
/// At most one pair is stored; `save` replaces it and `clear` is a no-op when
/// nothing is stored.
pub trait TokenStorage: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, AuthError>;
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;
    fn clear(&self) -> Result<(), AuthError>;
}

/// File-backed storage, `token.json` under the user's cache directory.
pub struct TokenStore {
    token_path: PathBuf,
}

impl TokenStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = Self::get_cache_dir()?;
        Self::at(cache_dir.join("token.json"))
    }

    /// Uses an explicit file location, creating its parent directory.
    pub fn at(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        if let Some(parent) = token_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        Ok(Self { token_path })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    fn get_cache_dir() -> Result<PathBuf, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("exercises");
        Ok(cache_dir)
    }
}

impl TokenStorage for TokenStore {
    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(credentials)?;

        fs::write(&self.token_path, json)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.token_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.token_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        tracing::debug!("Saved credentials to {}", self.token_path.display());
        Ok(())
    }

    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        let credentials: Credentials = serde_json::from_str(&json)?;
        Ok(Some(credentials))
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)
                .map_err(|e| AuthError::TokenStorage(format!("Failed to delete token: {}", e)))?;
            tracing::debug!("Removed credentials at {}", self.token_path.display());
        }
        Ok(())
    }
}

/// Process-local storage; nothing survives the process.
#[derive(Default)]
pub struct MemoryTokenStore {
    credentials: Mutex<Option<Credentials>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials: Mutex::new(Some(credentials)),
        }
    }
}

impl TokenStorage for MemoryTokenStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let guard = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(guard.clone())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let mut guard = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(credentials.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        let mut guard = self
            .credentials
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("nested").join("token.json")).unwrap();

        assert!(store.load().unwrap().is_none());

        let creds = Credentials::new("access-1", "refresh-1");
        store.save(&creds).unwrap();
        assert_eq!(store.load().unwrap(), Some(creds));

        store.save(&Credentials::new("access-2", "refresh-2")).unwrap();
        assert_eq!(
            store.load().unwrap().unwrap().access_token,
            "access-2".to_string()
        );

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());

        // Clearing twice is fine
        store.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_file_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token.json")).unwrap();
        store.save(&Credentials::new("a", "r")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::at(dir.path().join("token.json")).unwrap();
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(store.load(), Err(AuthError::Json(_))));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryTokenStore::new();
        assert!(store.load().unwrap().is_none());

        store.save(&Credentials::new("a", "r")).unwrap();
        assert_eq!(store.load().unwrap(), Some(Credentials::new("a", "r")));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
