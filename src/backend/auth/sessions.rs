/**
 * Session Management and JWT Tokens
 *
 * This module issues and verifies the HS256 tokens that carry a session.
 * A login yields a pair: a short-lived access token presented as a bearer
 * credential, and a longer-lived refresh token that can mint new access
 * tokens until it expires or is revoked.
 *
 * # Claims
 *
 * Every token carries `sub` (user id), `token_type`, a unique `jti`, `iat`
 * and `exp`. Verification uses zero leeway and checks the token type, so a
 * refresh token is never accepted where an access token is expected.
 */

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::config::AuthConfig;

/// Kind of token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    pub token_type: TokenType,
    /// Unique token id, used for revocation
    pub jti: String,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub
            .parse()
            .map_err(|_| TokenError::InvalidSubject(self.sub.clone()))
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}

/// Access and refresh token issued together at login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token rejected: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("expected {expected:?} token, got {actual:?}")]
    WrongType {
        expected: TokenType,
        actual: TokenType,
    },

    #[error("invalid subject in token: {0}")]
    InvalidSubject(String),

    #[error("token lifetime out of range")]
    Lifetime,
}

/// Signs and verifies tokens with the configured secret
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_ttls(
            config.jwt_secret.expose().as_bytes(),
            config.access_token_ttl(),
            config.refresh_token_ttl(),
        )
    }

    /// Build a service from a raw secret and lifetimes
    pub fn with_ttls(secret: &[u8], access_ttl: Duration, refresh_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            access_ttl,
            refresh_ttl,
        }
    }

    /// Create a token of the given type for a user
    pub fn issue(&self, user_id: i64, token_type: TokenType) -> Result<String, TokenError> {
        let now = Utc::now();
        let ttl = match token_type {
            TokenType::Access => self.access_ttl,
            TokenType::Refresh => self.refresh_ttl,
        };
        let claims = Claims {
            sub: user_id.to_string(),
            token_type,
            jti: uuid::Uuid::new_v4().simple().to_string(),
            iat: now.timestamp(),
            exp: now
                .checked_add_signed(ttl)
                .ok_or(TokenError::Lifetime)?
                .timestamp(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn issue_access(&self, user_id: i64) -> Result<String, TokenError> {
        self.issue(user_id, TokenType::Access)
    }

    /// Create an access/refresh pair for a user
    pub fn issue_pair(&self, user_id: i64) -> Result<TokenPair, TokenError> {
        Ok(TokenPair {
            access: self.issue(user_id, TokenType::Access)?,
            refresh: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    /// Verify signature, expiry and token type
    ///
    /// # Errors
    /// * `TokenError::Jwt` for a malformed, forged or expired token
    /// * `TokenError::WrongType` when the token is of the other kind
    pub fn verify(&self, token: &str, expected: TokenType) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;
        if claims.token_type != expected {
            return Err(TokenError::WrongType {
                expected,
                actual: claims.token_type,
            });
        }
        Ok(claims)
    }
}
