//! Capability token wire format.
//!
//! On the wire a token is two base64 segments joined by a dot:
//!
//! ```text
//! Authorization: Bearer <base64(payload)>.<base64(signature)>
//! ```
//!
//! The first segment decodes to a JSON payload, the second to a detached
//! Ed25519 signature over the SHA-256 digest of the payload bytes. The
//! digest doubles as the token's registry fingerprint, so the exact
//! payload bytes are preserved through parsing: re-serializing the JSON
//! could reorder keys and change the fingerprint.

use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use hashgate_registry::TokenHash;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{AuthError, Result};

/// Scheme prefix expected on the `Authorization` header.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Claims carried inside a capability token.
///
/// Field names follow the registration tooling's JSON conventions, so
/// serialization uses camelCase on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// Issue timestamp in milliseconds since the Unix epoch.
    pub iat: i64,

    /// Account the token claims to act as.
    pub account_id: String,

    /// Signing key the token was minted with, as `ed25519:<base58>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,

    /// Optional resource the token is scoped to. Parsed and preserved
    /// but not consulted by the current authorization gates.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

/// A parsed capability token.
///
/// Holds the original payload bytes alongside the decoded claims. The
/// fingerprint is computed once at parse time from those exact bytes.
#[derive(Clone, Debug)]
pub struct CapabilityToken {
    payload_bytes: Vec<u8>,
    payload: TokenPayload,
    hash: TokenHash,
    signature: Vec<u8>,
}

impl CapabilityToken {
    /// Parses a token from the value of an `Authorization` header.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the header is missing the
    /// `Bearer ` scheme or the remainder is not a valid token.
    pub fn from_header(header: &str) -> Result<Self> {
        let Some(wire) = header.strip_prefix(BEARER_PREFIX) else {
            return Err(AuthError::malformed("missing Bearer scheme"));
        };
        Self::from_wire(wire)
    }

    /// Parses a token from its wire form, `<payload_b64>.<signature_b64>`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedToken`] if the segment structure,
    /// base64 encoding, or payload JSON is invalid.
    pub fn from_wire(wire: &str) -> Result<Self> {
        let mut segments = wire.split('.');
        let (Some(payload_b64), Some(signature_b64), None) =
            (segments.next(), segments.next(), segments.next())
        else {
            return Err(AuthError::malformed("expected exactly two segments"));
        };

        if payload_b64.is_empty() || signature_b64.is_empty() {
            return Err(AuthError::malformed("empty segment"));
        }

        let payload_bytes = BASE64
            .decode(payload_b64)
            .map_err(|e| AuthError::malformed(format!("payload is not valid base64: {e}")))?;
        let signature = BASE64
            .decode(signature_b64)
            .map_err(|e| AuthError::malformed(format!("signature is not valid base64: {e}")))?;

        let payload: TokenPayload = serde_json::from_slice(&payload_bytes)
            .map_err(|e| AuthError::malformed(format!("payload is not valid JSON: {e}")))?;

        let hash = TokenHash::from_bytes(Sha256::digest(&payload_bytes).into());

        Ok(Self { payload_bytes, payload, hash, signature })
    }

    /// Returns the decoded claims.
    #[must_use]
    pub fn payload(&self) -> &TokenPayload {
        &self.payload
    }

    /// Returns the exact payload bytes as received on the wire.
    #[must_use]
    pub fn payload_bytes(&self) -> &[u8] {
        &self.payload_bytes
    }

    /// Returns the SHA-256 fingerprint of the payload bytes.
    #[must_use]
    pub fn hash(&self) -> &TokenHash {
        &self.hash
    }

    /// Returns the detached signature bytes.
    #[must_use]
    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Encodes the token back to its wire form.
    #[must_use]
    pub fn encode(&self) -> String {
        format!("{}.{}", BASE64.encode(&self.payload_bytes), BASE64.encode(&self.signature))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn wire(payload: &[u8], signature: &[u8]) -> String {
        format!("{}.{}", BASE64.encode(payload), BASE64.encode(signature))
    }

    #[test]
    fn test_parse_valid_token() {
        let payload = br#"{"iat":1700000000000,"accountId":"peter.near","publicKey":"ed25519:abc"}"#;
        let token = CapabilityToken::from_wire(&wire(payload, &[7u8; 64])).unwrap();

        assert_eq!(token.payload().iat, 1_700_000_000_000);
        assert_eq!(token.payload().account_id, "peter.near");
        assert_eq!(token.payload().public_key.as_deref(), Some("ed25519:abc"));
        assert!(token.payload().resource_id.is_none());
        assert_eq!(token.signature(), &[7u8; 64]);
        assert_eq!(token.payload_bytes(), payload);
    }

    #[test]
    fn test_hash_is_digest_of_exact_bytes() {
        let payload = br#"{"iat":1,"accountId":"a.near"}"#;
        let token = CapabilityToken::from_wire(&wire(payload, b"sig")).unwrap();

        let expected: [u8; 32] = Sha256::digest(payload.as_slice()).into();
        assert_eq!(token.hash().as_bytes(), &expected);
    }

    #[test]
    fn test_header_requires_bearer_scheme() {
        let payload = br#"{"iat":1,"accountId":"a.near"}"#;
        let wire = wire(payload, b"sig");

        assert!(CapabilityToken::from_header(&format!("Bearer {wire}")).is_ok());
        assert!(CapabilityToken::from_header(&wire).is_err());
        assert!(CapabilityToken::from_header(&format!("bearer {wire}")).is_err());
        assert!(CapabilityToken::from_header("").is_err());
    }

    #[test]
    fn test_rejects_wrong_segment_counts() {
        assert!(CapabilityToken::from_wire("onlyonesegment").is_err());
        assert!(CapabilityToken::from_wire("a.b.c").is_err());
        assert!(CapabilityToken::from_wire(".").is_err());
        assert!(CapabilityToken::from_wire("a.").is_err());
        assert!(CapabilityToken::from_wire(".b").is_err());
        assert!(CapabilityToken::from_wire("").is_err());
    }

    #[test]
    fn test_rejects_invalid_base64() {
        assert!(CapabilityToken::from_wire("not base64!.c2ln").is_err());
        assert!(CapabilityToken::from_wire("eyJ9.not base64!").is_err());
    }

    #[test]
    fn test_rejects_non_json_payload() {
        let result = CapabilityToken::from_wire(&wire(b"not json at all", b"sig"));
        assert!(matches!(result, Err(AuthError::MalformedToken(_))));
    }

    #[test]
    fn test_rejects_missing_required_claims() {
        // accountId is required; iat is required.
        assert!(CapabilityToken::from_wire(&wire(br#"{"iat":1}"#, b"sig")).is_err());
        assert!(CapabilityToken::from_wire(&wire(br#"{"accountId":"a.near"}"#, b"sig")).is_err());
    }

    #[test]
    fn test_encode_preserves_wire_form() {
        let payload = br#"{"iat":1,"accountId":"a.near","publicKey":"ed25519:abc"}"#;
        let original = wire(payload, &[3u8; 64]);
        let token = CapabilityToken::from_wire(&original).unwrap();

        assert_eq!(token.encode(), original);
    }

    #[test]
    fn test_payload_serializes_camel_case() {
        let payload = TokenPayload {
            iat: 42,
            account_id: "peter.near".into(),
            public_key: Some("ed25519:abc".into()),
            resource_id: None,
        };
        let json = serde_json::to_string(&payload).unwrap();

        assert!(json.contains("\"accountId\""));
        assert!(json.contains("\"publicKey\""));
        assert!(!json.contains("resourceId"));
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn parsing_never_panics(input in ".{0,256}") {
                let _ = CapabilityToken::from_wire(&input);
            }

            #[test]
            fn payload_round_trips_through_wire(
                iat in proptest::num::i64::ANY,
                account in "[a-z][a-z0-9._-]{0,60}",
            ) {
                let payload = TokenPayload {
                    iat,
                    account_id: account.clone(),
                    public_key: None,
                    resource_id: None,
                };
                let bytes = serde_json::to_vec(&payload).unwrap();
                let token = CapabilityToken::from_wire(&wire(&bytes, b"sig")).unwrap();

                prop_assert_eq!(token.payload().iat, iat);
                prop_assert_eq!(&token.payload().account_id, &account);
            }
        }
    }
}
