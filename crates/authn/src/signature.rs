//! Detached Ed25519 signature verification.

use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Key type prefix used by the ledger's key notation.
const ED25519_PREFIX: &str = "ed25519:";

/// Verifies a detached Ed25519 signature.
///
/// `public_key` is in ledger notation, `ed25519:<base58>`; the prefix is
/// optional. Any decoding failure counts as a failed verification rather
/// than a distinct error: a token with a mangled key is exactly as
/// unauthorized as one with a bad signature.
#[must_use]
pub fn verify_detached(public_key: &str, signature: &[u8], message: &[u8]) -> bool {
    let encoded = public_key.strip_prefix(ED25519_PREFIX).unwrap_or(public_key);

    let Ok(key_bytes) = bs58::decode(encoded).into_vec() else {
        return false;
    };
    let Ok(key_bytes) = <[u8; 32]>::try_from(key_bytes.as_slice()) else {
        return false;
    };
    let Ok(key) = VerifyingKey::from_bytes(&key_bytes) else {
        return false;
    };

    let Ok(sig_bytes) = <[u8; 64]>::try_from(signature) else {
        return false;
    };
    let signature = Signature::from_bytes(&sig_bytes);

    key.verify(message, &signature).is_ok()
}
