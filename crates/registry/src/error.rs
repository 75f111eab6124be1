//! Error types for registry lookups.
//!
//! Registry failures are a distinct category from verification failures:
//! a token that fails its signature check is `Unauthorized`, while a
//! registry that cannot be reached is a [`RegistryError`]. Callers must
//! not conflate the two.

use thiserror::Error;

/// Result type alias for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors surfaced by registry lookups.
///
/// # Non-exhaustive
///
/// This enum is marked `#[non_exhaustive]` — new variants may be added in
/// future minor releases without a semver-breaking change. Downstream match
/// expressions must include a wildcard arm (`_ =>`).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// Transport-level failure reaching the registry node.
    #[error("failed to connect to registry: {0}")]
    Connection(String),

    /// The registry call exceeded its deadline.
    #[error("registry request timed out")]
    Timeout,

    /// The registry answered with an RPC-level error.
    #[error("registry call failed: {message}")]
    Rpc {
        /// Error name or status reported by the node.
        code: String,
        /// Error message reported by the node.
        message: String,
    },

    /// The registry answered but the payload could not be interpreted.
    #[error("invalid registry response: {0}")]
    InvalidResponse(String),

    /// Configuration error.
    #[error("registry configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Timeout
        } else if err.is_decode() {
            RegistryError::InvalidResponse(err.to_string())
        } else {
            RegistryError::Connection(err.to_string())
        }
    }
}
