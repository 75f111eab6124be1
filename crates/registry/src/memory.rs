//! In-memory registry stand-in for development and testing.

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::{
    client::TokenRegistry,
    error::Result,
    types::{TokenBinding, TokenHash},
};

/// In-memory implementation of [`TokenRegistry`].
///
/// Bindings live in a shared map guarded by a read-write lock. Cloning
/// the registry shares the underlying map, so a test can hold one handle
/// for registration while the pipeline under test holds another.
///
/// Not for production use: bindings are lost on drop and there is no
/// consensus backing them.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenRegistry {
    bindings: Arc<RwLock<HashMap<TokenHash, String>>>,
}

impl MemoryTokenRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a fingerprint under the given account.
    ///
    /// Registering the same fingerprint twice overwrites the earlier
    /// binding, matching the registry contract's last-write semantics.
    pub fn register(&self, hash: TokenHash, account_id: impl Into<String>) {
        self.bindings.write().insert(hash, account_id.into());
    }

    /// Removes a binding, returning the account it was registered under.
    pub fn remove(&self, hash: &TokenHash) -> Option<String> {
        self.bindings.write().remove(hash)
    }

    /// Returns the number of registered bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.read().len()
    }

    /// Returns `true` if no bindings are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.read().is_empty()
    }
}

#[async_trait]
impl TokenRegistry for MemoryTokenRegistry {
    async fn resolve(&self, hash: &TokenHash) -> Result<Option<TokenBinding>> {
        Ok(self.bindings.read().get(hash).map(TokenBinding::new))
    }
}
