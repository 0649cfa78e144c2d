//! Bearer-token auth gate
//!
//! Resolves the `Authorization` header to a `UserIdentity` before the
//! pipeline may run. The pipeline never inspects the credential itself,
//! only the resolution outcome.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use specdraft_domain::UserIdentity;
use thiserror::Error;

/// Authentication error
#[derive(Debug, Error)]
pub enum AuthError {
    /// No `Authorization: Bearer ...` header was sent
    #[error("missing bearer credential")]
    MissingCredential,

    /// The token did not validate
    #[error("invalid session token")]
    InvalidToken,

    /// The token validated but has expired
    #[error("session token expired")]
    TokenExpired,

    /// Token issuance failed
    #[error("failed to encode session token: {0}")]
    JwtEncode(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims for session tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    /// User identifier
    user_id: String,

    /// Expiration timestamp (Unix epoch)
    exp: u64,

    /// Issued-at timestamp (Unix epoch)
    iat: u64,
}

/// Issues and validates HS256 session tokens
pub struct AuthGate {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_secs: u64,
}

impl AuthGate {
    /// Create a gate with the given signing secret and token lifetime
    pub fn new(jwt_secret: &str, token_expiry_secs: u64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            token_expiry_secs,
        }
    }

    /// Issue a session token for the given user
    pub fn generate_token(&self, user_id: &str) -> Result<String, AuthError> {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();

        let claims = SessionClaims {
            user_id: user_id.to_string(),
            exp: now + self.token_expiry_secs,
            iat: now,
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Token lifetime in seconds
    pub fn token_expiry_secs(&self) -> u64 {
        self.token_expiry_secs
    }

    /// Resolve an `Authorization` header value to a user identity.
    ///
    /// Accepts `Bearer <token>`; anything else is a missing credential.
    pub fn resolve(&self, authorization: Option<&str>) -> Result<UserIdentity, AuthError> {
        let header = authorization.ok_or(AuthError::MissingCredential)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::MissingCredential)?;

        let validation = Validation::default();
        let token_data = decode::<SessionClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })?;

        Ok(UserIdentity::new(
            token_data.claims.user_id,
            token_data.claims.exp,
        ))
    }
}
