use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config;

pub mod middleware;
pub mod password;

/// Role claims carried inside the token. Authorization is an exact string
/// match against one of these; there is no role hierarchy.
pub mod roles {
    pub const DOCTOR: &str = "doctor";
    pub const SECRETARY: &str = "secretary";
}

/// Identity assertion payload signed into every token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Stamp a fresh claims set for the given user. Expiry is explicit:
    /// now + `security.jwt_expiry_hours`.
    pub fn new(user_id: Uuid, email: String, full_name: String, role: String) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            user_id,
            email,
            full_name,
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Generation(String),

    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Sign claims with an explicit secret (HS256).
pub fn encode_claims(claims: &Claims, secret: &str) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| TokenError::Generation(e.to_string()))
}

/// Decode and verify a token against an explicit secret.
///
/// Malformed input, a signature mismatch and an expired token all collapse
/// uniformly to `None`; callers cannot (and must not) distinguish the cause.
pub fn decode_claims(token: &str, secret: &str) -> Option<Claims> {
    let decoding_key = DecodingKey::from_secret(secret.as_bytes());

    decode::<Claims>(token, &decoding_key, &Validation::default())
        .ok()
        .map(|data| data.claims)
}

/// Issue a signed token using the configured signing key.
pub fn issue_token(claims: &Claims) -> Result<String, TokenError> {
    encode_claims(claims, &config::config().security.jwt_secret)
}

/// Verify a token against the configured signing key.
pub fn verify_token(token: &str) -> Option<Claims> {
    decode_claims(token, &config::config().security.jwt_secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    fn claims() -> Claims {
        let now = Utc::now();
        Claims {
            user_id: Uuid::new_v4(),
            email: "rina@clinic.example".to_string(),
            full_name: "רינה לוי".to_string(),
            role: roles::DOCTOR.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let original = claims();
        let token = encode_claims(&original, SECRET).unwrap();
        let decoded = decode_claims(&token, SECRET).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut expired = claims();
        // Well past the default validation leeway
        expired.exp = (Utc::now() - Duration::hours(2)).timestamp();
        let token = encode_claims(&expired, SECRET).unwrap();
        assert!(decode_claims(&token, SECRET).is_none());
    }

    #[test]
    fn wrong_key_is_rejected() {
        let token = encode_claims(&claims(), SECRET).unwrap();
        assert!(decode_claims(&token, "some-other-secret").is_none());
    }

    #[test]
    fn malformed_token_is_rejected() {
        assert!(decode_claims("not-a-token", SECRET).is_none());
        assert!(decode_claims("", SECRET).is_none());
        assert!(decode_claims("a.b.c", SECRET).is_none());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        assert!(matches!(
            encode_claims(&claims(), ""),
            Err(TokenError::InvalidSecret)
        ));
    }
}
