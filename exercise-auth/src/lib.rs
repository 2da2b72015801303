// Types shared by the auth client and the session layer
pub mod common;

mod client;
mod error;

pub use client::{
    claims::Claims, AuthClient, AuthClientError, MemoryTokenStore, Settings, TokenStorage,
    TokenStore,
};
pub use common::{Credentials, TokenResponse};
pub use error::AuthError;
pub use secrecy::SecretString;
