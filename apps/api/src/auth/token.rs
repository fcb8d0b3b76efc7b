use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

pub const INVALID_TOKEN: &str = "Invalid token.";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Admin account id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signing and verification keys plus the validity window of issued tokens.
/// Tokens are stateless: there is no revocation, a token is valid until `exp`.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, account_id: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: account_id.to_string(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("token signing failed: {e}")))
    }

    /// Returns the account id embedded in a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<String, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims.sub)
            .map_err(|e| {
                debug!("Rejected token: {e}");
                AppError::Unauthorized(INVALID_TOKEN.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify_yields_account_id() {
        let keys = TokenKeys::new("s3cret", Duration::hours(168));
        let token = keys.issue("admin-1").unwrap();
        assert_eq!(keys.verify(&token).unwrap(), "admin-1");
    }

    #[test]
    fn test_token_lasts_seven_days() {
        let keys = TokenKeys::new("s3cret", Duration::hours(168));
        let token = keys.issue("admin-1").unwrap();
        let data = decode::<Claims>(&token, &keys.decoding, &Validation::default()).unwrap();
        assert_eq!(data.claims.exp - data.claims.iat, 7 * 24 * 3600);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = TokenKeys::new("one", Duration::hours(1)).issue("admin-1").unwrap();
        let err = TokenKeys::new("two", Duration::hours(1)).verify(&token).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(msg) if msg == INVALID_TOKEN));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = TokenKeys::new("s3cret", Duration::hours(1));
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            sub: "admin-1".into(),
            iat: past.timestamp(),
            exp: (past + Duration::minutes(5)).timestamp(),
        };
        let token = encode(&Header::default(), &claims, &keys.encoding).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let keys = TokenKeys::new("s3cret", Duration::hours(1));
        assert!(keys.verify("not.a.jwt").is_err());
        assert!(keys.verify("").is_err());
    }
}
