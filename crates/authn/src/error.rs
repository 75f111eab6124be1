//! Authentication error types.
//!
//! These errors are internal to the verification pipeline. At the HTTP
//! boundary they collapse into a [`Verdict`](crate::Verdict): malformed
//! input and registry failures keep their detail, every other failure
//! becomes an opaque rejection.

use hashgate_registry::RegistryError;
use thiserror::Error;

/// Result type alias for authentication operations.
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors raised while parsing or verifying a capability token.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// The token could not be decoded into payload and signature.
    #[error("failed to parse token: {0}")]
    MalformedToken(String),

    /// The issue timestamp falls outside the validity window.
    #[error("token outside validity window")]
    TokenExpired,

    /// Signature verification failed.
    #[error("invalid signature")]
    InvalidSignature,

    /// The payload carries no signing key to verify against.
    #[error("token payload carries no public key")]
    MissingPublicKey,

    /// The claimed account does not match the registered binding.
    #[error("token account does not match registered binding")]
    IdentityMismatch {
        /// Account the token claims.
        claimed: String,
        /// Account the registry has bound to the fingerprint.
        bound: String,
    },

    /// The token's fingerprint has no binding in the registry.
    #[error("token is not registered")]
    NoBinding,

    /// The registry lookup itself failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

impl AuthError {
    /// Creates a malformed-token error with the given detail.
    pub fn malformed(detail: impl Into<String>) -> Self {
        AuthError::MalformedToken(detail.into())
    }
}
