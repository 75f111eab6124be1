//! Authorization verdicts.
//!
//! The [`Authorizer`] is the single place where parsing, registry
//! resolution, freshness, identity, and signature checks come together.
//! Its output is a [`Verdict`] rather than a `Result`: every request gets
//! exactly one verdict, and the verdict shape controls how much the HTTP
//! layer may reveal about why a token was rejected.

use std::sync::Arc;

use hashgate_registry::{TokenBinding, TokenRegistry};

use crate::{
    error::AuthError,
    expiry::{TOKEN_EXPIRY_MILLIS, is_within_window, now_millis},
    signature::verify_detached,
    token::CapabilityToken,
};

/// Outcome of authorizing a request.
///
/// Rejections fall into three classes with different disclosure rules.
/// Malformed tokens and registry failures report their detail, because
/// neither leaks anything about registered credentials. All verification
/// failures share the opaque [`Unauthorized`](Verdict::Unauthorized)
/// variant: an attacker probing with forged tokens must not be able to
/// distinguish "unknown fingerprint" from "wrong signature" from
/// "expired".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The token proved possession of a registered identity.
    Accepted {
        /// Account the token is bound to in the registry.
        account_id: String,
    },

    /// The `Authorization` header could not be decoded into a token.
    MalformedToken {
        /// Human-readable parse failure.
        detail: String,
    },

    /// The registry could not answer; verification was not attempted.
    RegistryFailure {
        /// Upstream failure description.
        detail: String,
    },

    /// The token decoded but failed verification. Intentionally opaque.
    Unauthorized,
}

impl Verdict {
    /// Returns `true` for [`Verdict::Accepted`].
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}

/// Runs the full capability token verification pipeline.
///
/// Cheap to clone; holds a shared handle to the registry.
#[derive(Clone)]
pub struct Authorizer {
    registry: Arc<dyn TokenRegistry>,
    window_millis: i64,
}

impl Authorizer {
    /// Creates an authorizer using the default validity window.
    #[must_use]
    pub fn new(registry: Arc<dyn TokenRegistry>) -> Self {
        Self { registry, window_millis: TOKEN_EXPIRY_MILLIS }
    }

    /// Overrides the validity window, in milliseconds.
    #[must_use]
    pub fn with_window_millis(mut self, window_millis: i64) -> Self {
        self.window_millis = window_millis;
        self
    }

    /// Authorizes a request from its `Authorization` header, if any.
    ///
    /// A missing header is a malformed token: this endpoint has no
    /// anonymous tier, so absence and garbage are the same failure.
    #[tracing::instrument(skip_all)]
    pub async fn authorize(&self, header: Option<&str>) -> Verdict {
        match self.check(header).await {
            Ok(binding) => {
                tracing::debug!(account_id = %binding.account_id, "token accepted");
                Verdict::Accepted { account_id: binding.account_id }
            },
            Err(AuthError::MalformedToken(detail)) => {
                tracing::debug!(%detail, "token rejected as malformed");
                Verdict::MalformedToken { detail }
            },
            Err(AuthError::Registry(err)) => {
                tracing::warn!(error = %err, "registry lookup failed");
                Verdict::RegistryFailure { detail: err.to_string() }
            },
            Err(err) => {
                tracing::debug!(reason = %err, "token rejected");
                Verdict::Unauthorized
            },
        }
    }

    /// Runs the verification gates in order, stopping at the first
    /// failure.
    ///
    /// Gate order matters for what the error means, not for security:
    /// the registry lookup runs before the local checks so that a dead
    /// registry surfaces as an infrastructure failure even when the
    /// token would also have failed locally.
    async fn check(&self, header: Option<&str>) -> crate::error::Result<TokenBinding> {
        let header = header.ok_or_else(|| AuthError::malformed("missing Authorization header"))?;
        let token = CapabilityToken::from_header(header)?;

        let binding =
            self.registry.resolve(token.hash()).await?.ok_or(AuthError::NoBinding)?;

        if !is_within_window(token.payload().iat, now_millis(), self.window_millis) {
            return Err(AuthError::TokenExpired);
        }

        if token.payload().account_id != binding.account_id {
            return Err(AuthError::IdentityMismatch {
                claimed: token.payload().account_id.clone(),
                bound: binding.account_id.clone(),
            });
        }

        let public_key =
            token.payload().public_key.as_deref().ok_or(AuthError::MissingPublicKey)?;

        if !verify_detached(public_key, token.signature(), token.hash().as_ref()) {
            return Err(AuthError::InvalidSignature);
        }

        Ok(binding)
    }
}
