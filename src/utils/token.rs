use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::ErrorMessage;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

pub fn create_token(
    user_id: &str,
    secret: &[u8],
    expires_in_minutes: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    if user_id.is_empty() {
        return Err(jsonwebtoken::errors::ErrorKind::InvalidSubject.into());
    }

    let now = Utc::now();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: (now + Duration::minutes(expires_in_minutes)).timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
}

pub fn decode_token<T: Into<String>>(token: T, secret: &[u8]) -> Result<String, ErrorMessage> {
    let decoded = decode::<TokenClaims>(
        &token.into(),
        &DecodingKey::from_secret(secret),
        &Validation::new(Algorithm::HS256),
    );

    match decoded {
        Ok(token) => Ok(token.claims.sub),
        Err(_) => Err(ErrorMessage::InvalidToken),
    }
}

/// Random single-use token for email verification and password reset. The
/// raw value goes into the email; only the digest is stored.
pub fn generate_one_time_token() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn digest_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_decode_roundtrip() {
        let user_id = uuid::Uuid::new_v4().to_string();
        let secret = b"test-secret";

        let token = create_token(&user_id, secret, 60).unwrap();
        assert_eq!(decode_token(token, secret).unwrap(), user_id);
    }

    #[test]
    fn decode_with_wrong_secret_fails() {
        let token = create_token("some-user", b"secret-a", 60).unwrap();
        assert_eq!(
            decode_token(token, b"secret-b"),
            Err(ErrorMessage::InvalidToken)
        );
    }

    #[test]
    fn empty_user_id_is_rejected() {
        assert!(create_token("", b"secret", 60).is_err());
    }

    #[test]
    fn digest_is_stable_hex() {
        let digest = digest_token("abc");
        assert_eq!(digest.len(), 64);
        assert_eq!(digest, digest_token("abc"));
        assert_ne!(digest, digest_token("abd"));
    }
}
