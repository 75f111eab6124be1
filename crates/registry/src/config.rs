//! Configuration for the registry RPC client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, Result};

/// Default request timeout (10 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default connection timeout (5 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for [`RpcTokenRegistry`](crate::RpcTokenRegistry).
///
/// # Example
///
/// ```
/// use hashgate_registry::RegistryConfig;
///
/// let config = RegistryConfig::builder()
///     .rpc_url("https://rpc.testnet.example.org")
///     .contract_id("registry.testnet")
///     .build()?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// JSON-RPC endpoint of the ledger node.
    pub(crate) rpc_url: String,

    /// Account of the registry contract to query.
    pub(crate) contract_id: String,

    /// Network identifier, used for logging only.
    #[serde(default)]
    pub(crate) network_id: Option<String>,

    /// Request timeout.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub(crate) timeout: Duration,

    /// Connection timeout.
    #[serde(with = "humantime_serde", default = "default_connect_timeout")]
    pub(crate) connect_timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

fn default_connect_timeout() -> Duration {
    DEFAULT_CONNECT_TIMEOUT
}

#[bon::bon]
impl RegistryConfig {
    /// Creates a new configuration, validating all required fields.
    ///
    /// # Arguments
    ///
    /// * `rpc_url` - JSON-RPC endpoint of the ledger node.
    /// * `contract_id` - Account of the registry contract to query.
    ///
    /// # Optional Fields
    ///
    /// * `network_id` - Network identifier for logging.
    /// * `timeout` - Request timeout (default: 10 seconds).
    /// * `connect_timeout` - Connection timeout (default: 5 seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if `rpc_url` or `contract_id` is empty.
    #[builder]
    pub fn new(
        #[builder(into)] rpc_url: String,
        #[builder(into)] contract_id: String,
        #[builder(into)] network_id: Option<String>,
        #[builder(default = DEFAULT_TIMEOUT)] timeout: Duration,
        #[builder(default = DEFAULT_CONNECT_TIMEOUT)] connect_timeout: Duration,
    ) -> Result<Self> {
        if rpc_url.is_empty() {
            return Err(RegistryError::Config("rpc_url cannot be empty".into()));
        }
        if contract_id.is_empty() {
            return Err(RegistryError::Config("contract_id cannot be empty".into()));
        }

        Ok(Self { rpc_url, contract_id, network_id, timeout, connect_timeout })
    }

    /// Returns the RPC endpoint URL.
    #[must_use]
    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Returns the registry contract account.
    #[must_use]
    pub fn contract_id(&self) -> &str {
        &self.contract_id
    }

    /// Returns the network identifier if configured.
    #[must_use]
    pub fn network_id(&self) -> Option<&str> {
        self.network_id.as_deref()
    }

    /// Returns the request timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the connection timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }
}
