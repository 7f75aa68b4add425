//! HS256 token validation implementing `TokenValidator`.
//!
//! Tokens carry `sub` (the authenticated identity) and `exp`. Validation
//! checks signature and expiry only; the identity is not bound to the
//! comment's declared author.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use danmaku_core::auth::TokenValidator;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// JWT implementation of `TokenValidator`.
pub struct JwtTokenValidator {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtTokenValidator {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }
}

impl TokenValidator for JwtTokenValidator {
    async fn validate(&self, token: &str) -> bool {
        decode::<Claims>(token, &self.decoding, &self.validation).is_ok()
    }
}

/// Mint a token for the given subject. Returns the token and its expiry
/// as a unix timestamp.
///
/// Used by the CLI `token` command and by tests; the service itself only
/// ever validates.
pub fn issue_token(secret: &str, subject: &str, ttl_hours: u64) -> anyhow::Result<(String, u64)> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let expires_at = now + ttl_hours * 3600;

    let claims = Claims {
        sub: subject.to_string(),
        exp: expires_at as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[tokio::test]
    async fn test_issued_token_validates() {
        let (token, expires_at) = issue_token(SECRET, "mika", 1).unwrap();
        let validator = JwtTokenValidator::new(SECRET);

        assert!(validator.validate(&token).await);
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        assert!(expires_at > now);
    }

    #[tokio::test]
    async fn test_wrong_secret_is_invalid() {
        let (token, _) = issue_token(SECRET, "mika", 1).unwrap();
        let validator = JwtTokenValidator::new("other-secret");

        assert!(!validator.validate(&token).await);
    }

    #[tokio::test]
    async fn test_expired_token_is_invalid() {
        // Encode an exp two hours in the past, beyond the default leeway.
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs();
        let claims = Claims {
            sub: "mika".to_string(),
            exp: (now - 7200) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        let validator = JwtTokenValidator::new(SECRET);
        assert!(!validator.validate(&token).await);
    }

    #[tokio::test]
    async fn test_garbage_token_is_invalid() {
        let validator = JwtTokenValidator::new(SECRET);

        assert!(!validator.validate("not-a-token").await);
        assert!(!validator.validate("").await);
    }
}
