//! Write-once caches for chain metadata
//!
//! Wrapped-native addresses, pool deployers and token decimals never
//! change for a given deployment, so each is resolved at most once per
//! process and shared behind an RwLock.

use alloy::primitives::Address;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct TokenCaches {
    wrapped_native: RwLock<HashMap<Address, Address>>,
    pool_deployers: RwLock<HashMap<Address, Address>>,
    decimals: RwLock<HashMap<String, u32>>,
}

impl TokenCaches {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn wrapped_native(&self, router: Address) -> Option<Address> {
        self.wrapped_native.read().await.get(&router).copied()
    }

    pub async fn set_wrapped_native(&self, router: Address, wrapped: Address) {
        self.wrapped_native.write().await.insert(router, wrapped);
    }

    pub async fn pool_deployer(&self, router: Address) -> Option<Address> {
        self.pool_deployers.read().await.get(&router).copied()
    }

    pub async fn set_pool_deployer(&self, router: Address, deployer: Address) {
        self.pool_deployers.write().await.insert(router, deployer);
    }

    pub async fn decimals(&self, symbol: &str) -> Option<u32> {
        self.decimals.read().await.get(symbol).copied()
    }

    pub async fn set_decimals(&self, symbol: &str, decimals: u32) {
        self.decimals.write().await.insert(symbol.to_string(), decimals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[tokio::test]
    async fn caches_are_empty_until_set() {
        let caches = TokenCaches::new();
        let router = address!("398ac3b5d6c8279ea32ed05ca2b8331132afcebe");

        assert!(caches.wrapped_native(router).await.is_none());
        caches.set_wrapped_native(router, router).await;
        assert_eq!(caches.wrapped_native(router).await, Some(router));

        assert!(caches.decimals("USDC").await.is_none());
        caches.set_decimals("USDC", 6).await;
        assert_eq!(caches.decimals("USDC").await, Some(6));
    }
}
