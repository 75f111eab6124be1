//! Registry lookup trait and JSON-RPC client implementation.

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::RegistryConfig,
    error::{RegistryError, Result},
    types::{TokenBinding, TokenHash},
};

/// View method on the registry contract that maps a fingerprint to its
/// registered account.
const RESOLVE_METHOD: &str = "get_account_id_for_token";

/// Read-only lookup of capability token bindings.
///
/// This is the single seam between the authorization pipeline and the
/// external ledger. Implementations must be pure lookups: no mutation,
/// queryable by any caller holding a fingerprint.
///
/// # Contract
///
/// - `Ok(Some(binding))` — the fingerprint is registered to an account.
/// - `Ok(None)` — the fingerprint is unknown. Never a default identity.
/// - `Err(..)` — the registry itself failed; distinct from "unknown".
#[async_trait]
pub trait TokenRegistry: Send + Sync {
    /// Resolves a token fingerprint to its registered binding.
    ///
    /// # Errors
    ///
    /// Returns a [`RegistryError`] if the registry is unreachable, times
    /// out, or answers with an uninterpretable payload.
    async fn resolve(&self, hash: &TokenHash) -> Result<Option<TokenBinding>>;
}

/// JSON-RPC 2.0 envelope returned by the ledger node.
#[derive(Debug, Deserialize)]
struct RpcEnvelope {
    result: Option<CallResult>,
    error: Option<RpcErrorBody>,
}

/// Result of a `call_function` query: the contract's return value as
/// raw bytes, which themselves contain JSON.
#[derive(Debug, Deserialize)]
struct CallResult {
    #[serde(default)]
    result: Vec<u8>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

/// Ledger-backed implementation of [`TokenRegistry`].
///
/// Issues read-only `call_function` queries against the configured
/// registry contract over JSON-RPC. The underlying HTTP client enforces
/// the configured request and connection timeouts, so a stalled node
/// surfaces as [`RegistryError::Timeout`] rather than blocking the
/// request task indefinitely.
///
/// # Thread Safety
///
/// `RpcTokenRegistry` is `Send + Sync`; the HTTP client manages
/// connection pooling internally and the configuration is read-only
/// after construction.
#[derive(Debug, Clone)]
pub struct RpcTokenRegistry {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RpcTokenRegistry {
    /// Creates a registry client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Config`] if the HTTP client cannot be
    /// constructed.
    pub fn new(config: RegistryConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| RegistryError::Config(e.to_string()))?;

        Ok(Self { http, config })
    }

    /// Returns the configuration this client was built from.
    #[must_use]
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Performs a read-only view call against the registry contract and
    /// returns the raw result bytes.
    async fn view_call(&self, method_name: &str, args: &serde_json::Value) -> Result<Vec<u8>> {
        let args_base64 = BASE64.encode(serde_json::to_vec(args).map_err(|e| {
            RegistryError::InvalidResponse(format!("failed to encode call args: {e}"))
        })?);

        let body = json!({
            "jsonrpc": "2.0",
            "id": "hashgate",
            "method": "query",
            "params": {
                "request_type": "call_function",
                "finality": "final",
                "account_id": self.config.contract_id(),
                "method_name": method_name,
                "args_base64": args_base64,
            },
        });

        let response = self.http.post(self.config.rpc_url()).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RegistryError::Rpc { code: status.to_string(), message });
        }

        let envelope: RpcEnvelope = response.json().await?;

        if let Some(error) = envelope.error {
            let message = error
                .message
                .or_else(|| error.data.map(|d| d.to_string()))
                .unwrap_or_else(|| "unknown RPC error".into());
            return Err(RegistryError::Rpc {
                code: error.name.unwrap_or_else(|| "RPC_ERROR".into()),
                message,
            });
        }

        let call = envelope
            .result
            .ok_or_else(|| RegistryError::InvalidResponse("missing result field".into()))?;

        if let Some(execution_error) = call.error {
            return Err(RegistryError::Rpc { code: "EXECUTION_ERROR".into(), message: execution_error });
        }

        Ok(call.result)
    }
}

#[async_trait]
impl TokenRegistry for RpcTokenRegistry {
    #[tracing::instrument(skip(self), fields(contract = %self.config.contract_id(), hash = %hash))]
    async fn resolve(&self, hash: &TokenHash) -> Result<Option<TokenBinding>> {
        let args = json!({ "token_hash": hash.as_bytes().to_vec() });
        let raw = self.view_call(RESOLVE_METHOD, &args).await?;

        // The contract returns Option<String> as JSON: either an account
        // id or null for an unregistered fingerprint.
        let account_id: Option<String> = serde_json::from_slice(&raw).map_err(|e| {
            RegistryError::InvalidResponse(format!("failed to decode binding: {e}"))
        })?;

        match account_id {
            Some(account_id) => {
                tracing::debug!(account_id = %account_id, "resolved token binding");
                Ok(Some(TokenBinding { account_id }))
            },
            None => {
                tracing::debug!("no binding for token fingerprint");
                Ok(None)
            },
        }
    }
}
