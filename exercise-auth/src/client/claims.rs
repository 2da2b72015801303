//! Best-effort reading of the access token's payload.
//!
//! The signature is not checked; the server remains the authority on identity.
//! Claims are only used to show who is logged in and to pick out the user's
//! own exercises.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

const EXPIRY_BUFFER: Duration = Duration::seconds(30);

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl Claims {
    /// Returns `None` for anything that is not a three-segment token with a
    /// JSON payload.
    pub fn decode(token: &str) -> Option<Self> {
        let mut segments = token.split('.');
        let (_header, payload, _signature) = (segments.next()?, segments.next()?, segments.next()?);
        if segments.next().is_some() {
            return None;
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    /// Tokens within a short buffer of expiry count as expired.
    pub fn is_expired(&self) -> bool {
        match self.expires_at() {
            Some(expires_at) => expires_at <= Utc::now() + EXPIRY_BUFFER,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_subject_and_expiry() {
        let exp = Utc::now().timestamp() + 3600;
        let token = token_with(&format!(r#"{{"sub":"alice","exp":{}}}"#, exp));

        let claims = Claims::decode(&token).unwrap();
        assert_eq!(claims.subject(), Some("alice"));
        assert_eq!(claims.expires_at().unwrap().timestamp(), exp);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let exp = Utc::now().timestamp() - 10;
        let claims = Claims::decode(&token_with(&format!(r#"{{"sub":"bob","exp":{}}}"#, exp)))
            .unwrap();
        assert!(claims.is_expired());
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"carol"}"#);
        let token = format!("h.{}.s", payload);
        assert_eq!(Claims::decode(&token).unwrap().subject(), Some("carol"));
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(Claims::decode("opaque-token").is_none());
        assert!(Claims::decode("a.b").is_none());
        assert!(Claims::decode("a.!!!.c").is_none());
        assert!(Claims::decode("a.b.c.d").is_none());
        assert!(Claims::decode(&format!("h.{}.s", URL_SAFE_NO_PAD.encode("not json"))).is_none());
    }
}
