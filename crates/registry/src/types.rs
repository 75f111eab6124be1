//! Core types shared across registry implementations.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Length in bytes of a token fingerprint digest (SHA-256).
pub const TOKEN_HASH_LEN: usize = 32;

/// SHA-256 fingerprint identifying a capability token in the registry.
///
/// The fingerprint is a pure, deterministic function of the token's payload
/// bytes: it identifies a token without revealing its contents, so it is
/// safe to send to the registry in the clear. Fingerprints are not secret —
/// the token's signature is the secret-bearing component.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenHash([u8; TOKEN_HASH_LEN]);

impl TokenHash {
    /// Creates a fingerprint from raw digest bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; TOKEN_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw digest bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TOKEN_HASH_LEN] {
        &self.0
    }

    /// Encodes the fingerprint as lowercase hex.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenHash({}…)", &self.to_hex()[..8])
    }
}

impl fmt::Display for TokenHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<[u8; TOKEN_HASH_LEN]> for TokenHash {
    fn from(bytes: [u8; TOKEN_HASH_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for TokenHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Identity bound to a token fingerprint in the registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBinding {
    /// Account the fingerprint was registered under.
    pub account_id: String,
}

impl TokenBinding {
    /// Creates a binding for the given account.
    pub fn new(account_id: impl Into<String>) -> Self {
        Self { account_id: account_id.into() }
    }
}
