//! Session verification port.
//!
//! Credentials are checked by the external authentication provider. The
//! service only verifies the session token it issued.

use uuid::Uuid;

use crate::domain::VerifiedIdentity;

/// Claims carried by a session token. Tokens never carry a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
    pub photo_url: Option<String>,
    pub session_id: Uuid,
    pub exp: i64,
}

impl From<SessionClaims> for VerifiedIdentity {
    fn from(claims: SessionClaims) -> Self {
        Self {
            uid: claims.uid,
            email: claims.email,
            display_name: claims.display_name,
            photo_url: claims.photo_url,
        }
    }
}

/// Token service trait for session tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a verified identity.
    fn generate_token(&self, identity: &VerifiedIdentity) -> Result<String, AuthError>;

    /// Validate and decode a token.
    fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Insufficient permissions")]
    InsufficientPermissions,
}
