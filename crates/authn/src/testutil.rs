//! Test helpers for minting capability tokens.
//!
//! Gated behind `#[cfg(any(test, feature = "testutil"))]` so production
//! builds never link the key generation path.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use ed25519_dalek::{Signer, SigningKey};
use rand_core::OsRng;
use sha2::{Digest, Sha256};

use crate::token::{BEARER_PREFIX, CapabilityToken, TokenPayload};

/// An Ed25519 keypair for minting test tokens.
pub struct TestKey {
    signing: SigningKey,
}

impl TestKey {
    /// Generates a fresh random keypair.
    #[must_use]
    pub fn generate() -> Self {
        Self { signing: SigningKey::generate(&mut OsRng) }
    }

    /// Returns the public key in ledger notation, `ed25519:<base58>`.
    #[must_use]
    pub fn public_key_string(&self) -> String {
        format!("ed25519:{}", bs58::encode(self.signing.verifying_key().as_bytes()).into_string())
    }

    /// Mints a correctly signed token for the given account and issue
    /// time.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails, which cannot happen for these
    /// payloads.
    #[must_use]
    pub fn mint_token(&self, account_id: &str, iat: i64) -> CapabilityToken {
        self.mint_token_with_public_key(account_id, iat, &self.public_key_string())
    }

    /// Mints a token whose payload claims an arbitrary public key. The
    /// signature is still made with this key, so a mismatched claim
    /// produces a token that fails verification.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails.
    #[must_use]
    pub fn mint_token_with_public_key(
        &self,
        account_id: &str,
        iat: i64,
        public_key: &str,
    ) -> CapabilityToken {
        self.mint(TokenPayload {
            iat,
            account_id: account_id.into(),
            public_key: Some(public_key.into()),
            resource_id: None,
        })
    }

    /// Mints a signed token whose payload omits the public key claim.
    ///
    /// # Panics
    ///
    /// Panics if serialization fails.
    #[must_use]
    pub fn mint_token_without_public_key(&self, account_id: &str, iat: i64) -> CapabilityToken {
        self.mint(TokenPayload {
            iat,
            account_id: account_id.into(),
            public_key: None,
            resource_id: None,
        })
    }

    #[allow(clippy::expect_used)]
    fn mint(&self, payload: TokenPayload) -> CapabilityToken {
        let payload_bytes = serde_json::to_vec(&payload).expect("payload serializes");
        let digest = Sha256::digest(&payload_bytes);
        let signature = self.signing.sign(&digest).to_bytes();

        let wire = format!("{}.{}", BASE64.encode(&payload_bytes), BASE64.encode(signature));
        CapabilityToken::from_wire(&wire).expect("minted token parses")
    }
}

/// Formats a token as an `Authorization` header value.
#[must_use]
pub fn bearer(token: &CapabilityToken) -> String {
    format!("{BEARER_PREFIX}{}", token.encode())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::signature::verify_detached;

    #[test]
    fn test_minted_token_signature_verifies() {
        let key = TestKey::generate();
        let token = key.mint_token("peter.near", 1_700_000_000_000);

        assert!(verify_detached(
            &key.public_key_string(),
            token.signature(),
            token.hash().as_ref(),
        ));
    }

    #[test]
    fn test_bearer_header_round_trips() {
        let key = TestKey::generate();
        let token = key.mint_token("peter.near", 42);
        let header = bearer(&token);

        let parsed = CapabilityToken::from_header(&header).unwrap();
        assert_eq!(parsed.hash(), token.hash());
        assert_eq!(parsed.payload(), token.payload());
    }
}
