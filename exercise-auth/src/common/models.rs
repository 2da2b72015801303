use serde::{Deserialize, Serialize};

/// Token pair as returned by `/auth/token` and `/auth/refresh`
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

/// The persisted session: one access/refresh pair
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub refresh_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

impl From<TokenResponse> for Credentials {
    fn from(tokens: TokenResponse) -> Self {
        Self {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }
    }
}

// Tokens must never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_tokens() {
        let creds = Credentials::new("secret-access", "secret-refresh");
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("secret-access"));
        assert!(!debug.contains("secret-refresh"));
    }

    #[test]
    fn test_token_response_conversion() {
        let response: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "refresh_token": "r", "token_type": "bearer"}"#,
        )
        .unwrap();
        assert_eq!(Credentials::from(response), Credentials::new("a", "r"));
    }
}
