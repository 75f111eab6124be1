//! Capability token authentication for the gateway.
//!
//! A capability token is a self-describing credential: a JSON payload
//! carrying the claimed account and signing key, plus a detached Ed25519
//! signature over the payload's SHA-256 digest. Tokens are minted offline
//! by the account holder and registered out of band, so verification here
//! never touches a credential store. Instead the pipeline asks the ledger
//! registry who a token's fingerprint is bound to, then checks that the
//! token proves possession of exactly that identity.
//!
//! # Pipeline
//!
//! [`Authorizer::authorize`] runs the gates in order and stops at the
//! first failure:
//!
//! 1. Parse the `Authorization` header into a [`CapabilityToken`].
//! 2. Resolve the token's fingerprint against the registry.
//! 3. Check the issue timestamp against the validity window.
//! 4. Check the claimed account matches the registered binding.
//! 5. Verify the Ed25519 signature over the payload digest.
//!
//! The outcome is a [`Verdict`], which deliberately collapses every
//! verification failure into a single opaque variant so callers cannot
//! learn which gate rejected the token.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod decision;
mod error;
mod expiry;
mod signature;
mod token;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use decision::{Authorizer, Verdict};
pub use error::{AuthError, Result};
pub use expiry::{TOKEN_EXPIRY_MILLIS, is_within_window, now_millis};
pub use signature::verify_detached;
pub use token::{BEARER_PREFIX, CapabilityToken, TokenPayload};
