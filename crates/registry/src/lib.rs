//! Ledger registry client for capability token bindings.
//!
//! The registry is an external, consensus-backed service that stores
//! token-hash → account bindings. This crate provides [`TokenRegistry`],
//! the narrow read-only interface the authorization pipeline depends on,
//! together with a JSON-RPC client implementation for production and an
//! in-memory stand-in for tests.
//!
//! # Design
//!
//! The registry is the sole source of truth for identity bindings. The
//! trait exposes exactly one operation — resolve a fingerprint to its
//! bound account — so registry-specific call shapes never leak into the
//! authorization decision. An unknown fingerprint resolves to `Ok(None)`,
//! never to a default identity.
//!
//! # Example
//!
//! ```no_run
//! // Requires a reachable registry RPC node.
//! use hashgate_registry::{RegistryConfig, RpcTokenRegistry, TokenHash, TokenRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RegistryConfig::builder()
//!     .rpc_url("https://rpc.testnet.example.org")
//!     .contract_id("registry.testnet")
//!     .build()?;
//!
//! let registry = RpcTokenRegistry::new(config)?;
//! let binding = registry.resolve(&TokenHash::from_bytes([0u8; 32])).await?;
//! assert!(binding.is_none());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod error;
mod memory;
mod types;

pub use client::{RpcTokenRegistry, TokenRegistry};
pub use config::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT, RegistryConfig};
pub use error::{RegistryError, Result};
pub use memory::MemoryTokenRegistry;
pub use types::{TOKEN_HASH_LEN, TokenBinding, TokenHash};
