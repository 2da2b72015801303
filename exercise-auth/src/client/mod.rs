pub mod auth_client;
pub mod claims;
mod config;
mod token_storage;

pub use auth_client::{AuthClient, AuthClientError};
pub use config::Settings;
pub use token_storage::{MemoryTokenStore, TokenStorage, TokenStore};
