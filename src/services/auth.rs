//! Authentication primitives: password digests and access tokens.
//!
//! Passwords are stored as `salt$hex(sha256(salt $ password))`; access
//! tokens are HS256 JSON Web Tokens carrying the user id and username with a
//! one-hour expiry.

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Lifetime of issued access tokens, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Error type for authentication operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Token is missing, malformed, tampered with, or expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// Stored password digest does not have the expected `salt$digest` shape.
    #[error("malformed password digest")]
    MalformedDigest,
}

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    /// Username, for display without a user lookup.
    pub username: String,
    /// Issued-at, seconds since the Unix epoch.
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    format!("{}${}", salt, salted_digest(&salt, password))
}

/// Verify a password against a stored `salt$digest` value.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let (salt, digest) = stored.split_once('$').ok_or(AuthError::MalformedDigest)?;
    Ok(salted_digest(salt, password) == digest)
}

fn salted_digest(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(b"$");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Issue an access token for a user.
pub fn issue_token(secret: &str, user_id: &str, username: &str) -> Result<String, AuthError> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now,
        exp: now + TOKEN_TTL_SECS,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|_| AuthError::InvalidToken)
}

/// Verify an access token and return its claims.
pub fn verify_token(secret: &str, token: &str) -> Result<Claims, AuthError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AuthError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_roundtrip() {
        let stored = hash_password("s3cret");
        assert!(verify_password("s3cret", &stored).unwrap());
        assert!(!verify_password("wrong", &stored).unwrap());
    }

    #[test]
    fn test_same_password_different_salts() {
        assert_ne!(hash_password("s3cret"), hash_password("s3cret"));
    }

    #[test]
    fn test_malformed_digest_is_an_error() {
        assert_eq!(
            verify_password("s3cret", "no-salt-separator"),
            Err(AuthError::MalformedDigest)
        );
    }

    #[test]
    fn test_token_roundtrip() {
        let token = issue_token("test-secret", "user-1", "alice").unwrap();
        let claims = verify_token("test-secret", &token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_rejected_with_wrong_secret() {
        let token = issue_token("test-secret", "user-1", "alice").unwrap();
        assert_eq!(
            verify_token("other-secret", &token),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert_eq!(
            verify_token("test-secret", "not.a.token"),
            Err(AuthError::InvalidToken)
        );
    }
}
