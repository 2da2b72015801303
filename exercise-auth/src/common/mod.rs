mod models;

pub use models::{Credentials, TokenResponse};
