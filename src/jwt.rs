//! Session token generation and validation.
//!
//! Sessions are a single stateless HS256 token carrying the user's public
//! identifier and an expiration one hour after issue. There is no server-side
//! session store and no revocation list; logout discards the cookie.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Session token duration: 1 hour.
pub const SESSION_TOKEN_DURATION_SECS: u64 = 60 * 60;

/// JWT claims for a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (user UUID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

/// Configuration for JWT operations.
#[derive(Clone)]
pub struct JwtConfig {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtConfig {
    /// Create a new JWT configuration with the given secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        }
    }

    /// Issue a session token for a user. The expiration is fixed at
    /// issue time plus [`SESSION_TOKEN_DURATION_SECS`].
    pub fn issue_session_token(&self, user_uuid: &str) -> Result<String, JwtError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| JwtError::TimeError)?
            .as_secs();

        let claims = SessionClaims {
            sub: user_uuid.to_string(),
            iat: now,
            exp: now + SESSION_TOKEN_DURATION_SECS,
        };

        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(JwtError::Encoding)
    }

    /// Validate and decode a session token. The token is accepted only when
    /// the signature verifies exactly and the expiration is in the future.
    pub fn validate_session_token(&self, token: &str) -> Result<SessionClaims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        match jsonwebtoken::decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => Err(match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::SignatureMismatch,
                _ => JwtError::Malformed,
            }),
        }
    }
}

/// Errors that can occur during JWT operations.
#[derive(Debug)]
pub enum JwtError {
    /// Error encoding the token
    Encoding(jsonwebtoken::errors::Error),
    /// Token is not a well-formed JWT or carries unusable claims
    Malformed,
    /// Signature does not verify against the server secret
    SignatureMismatch,
    /// Token was valid once but its expiration has passed
    Expired,
    /// System time error
    TimeError,
}

impl std::fmt::Display for JwtError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JwtError::Encoding(e) => write!(f, "Failed to encode token: {}", e),
            JwtError::Malformed => write!(f, "Malformed token"),
            JwtError::SignatureMismatch => write!(f, "Token signature mismatch"),
            JwtError::Expired => write!(f, "Token expired"),
            JwtError::TimeError => write!(f, "System time error"),
        }
    }
}

impl std::error::Error for JwtError {}
