//! Venue quote retrieval
//!
//! Constant-product routers quote through getAmountsOut. Concentrated
//! routers have no view quoter on this deployment, so quotes come from
//! an eth_call simulation of exactInputSingle with a zero output floor.

use alloy::{
    primitives::{Address, Bytes, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::{self, settings::QUOTE_TIMEOUT_SECS},
    quotes::{abi, caches::TokenCaches},
    types::{Quote, Venue},
    ConcreteProvider,
};

pub struct QuoteClient {
    provider: Arc<ConcreteProvider>,
    caches: Arc<TokenCaches>,
    /// Simulation sender. Concentrated quotes pull funds from the
    /// caller, so this must be the trading account for them to succeed.
    caller: Address,
}

impl QuoteClient {
    pub fn new(provider: Arc<ConcreteProvider>, caches: Arc<TokenCaches>, caller: Address) -> Self {
        Self { provider, caches, caller }
    }

    async fn call(&self, to: Address, data: Vec<u8>) -> Result<Bytes> {
        let tx = TransactionRequest::default().to(to).input(data.into());
        let result = tokio::time::timeout(
            Duration::from_secs(QUOTE_TIMEOUT_SECS),
            self.provider.call(&tx),
        )
        .await
        .context("eth_call timed out")??;
        Ok(result)
    }

    /// Wrapped form of the native asset as the given router sees it.
    /// Tried in order: cache, WETH(), WNativeToken(), the configured
    /// chain-wide wrapped address.
    pub async fn wrapped_native(&self, venue: &Venue) -> Address {
        if let Some(cached) = self.caches.wrapped_native(venue.router).await {
            return cached;
        }

        let resolved = match self.call(venue.router, abi::encode_weth()).await {
            Ok(data) => abi::decode_address(&data).ok(),
            Err(_) => None,
        };
        let resolved = match resolved {
            Some(addr) => Some(addr),
            None => match self.call(venue.router, abi::encode_wnative_token()).await {
                Ok(data) => abi::decode_address(&data).ok(),
                Err(_) => None,
            },
        };

        let wrapped = resolved.unwrap_or(config::WRAPPED_MON);
        self.caches.set_wrapped_native(venue.router, wrapped).await;
        wrapped
    }

    /// Per-venue pool deployer for concentrated routers. Zero when the
    /// router does not expose one.
    pub async fn pool_deployer(&self, venue: &Venue) -> Address {
        if let Some(cached) = self.caches.pool_deployer(venue.router).await {
            return cached;
        }

        let deployer = match self.call(venue.router, abi::encode_pool_deployer()).await {
            Ok(data) => abi::decode_address(&data).unwrap_or(Address::ZERO),
            Err(_) => Address::ZERO,
        };
        self.caches.set_pool_deployer(venue.router, deployer).await;
        deployer
    }

    /// Decimal precision for an asset. Read from the token contract
    /// once; unreachable contracts fall back to 6 for the known
    /// stablecoins and 18 otherwise.
    pub async fn decimals(&self, symbol: &str) -> u32 {
        if config::is_native(symbol) {
            return 18;
        }
        if let Some(cached) = self.caches.decimals(symbol).await {
            return cached;
        }

        let read = match config::token_address(symbol) {
            Some(token) => match self.call(token, abi::encode_decimals()).await {
                Ok(data) => abi::decode_u8(&data).ok().map(u32::from),
                Err(_) => None,
            },
            None => None,
        };

        let decimals = read.unwrap_or(match symbol {
            "USDC" | "USDT" => 6,
            _ => 18,
        });
        self.caches.set_decimals(symbol, decimals).await;
        decimals
    }

    /// On-chain address an asset trades under on this venue. The native
    /// asset maps to the router's wrapped form.
    pub async fn resolve_asset(&self, venue: &Venue, symbol: &str) -> Option<Address> {
        if config::is_native(symbol) {
            Some(self.wrapped_native(venue).await)
        } else {
            config::token_address(symbol)
        }
    }

    /// Raw output amount for swapping `amount_in` of `asset_in` into
    /// `asset_out` on this venue. None when the venue cannot quote the
    /// pair.
    pub async fn amount_out(
        &self,
        venue: &Venue,
        asset_in: &str,
        asset_out: &str,
        amount_in: U256,
    ) -> Option<U256> {
        let token_in = self.resolve_asset(venue, asset_in).await?;
        let token_out = self.resolve_asset(venue, asset_out).await?;

        let result = if venue.is_concentrated() {
            self.simulate_concentrated(venue, token_in, token_out, amount_in, asset_in)
                .await
        } else {
            self.constant_product_out(venue, token_in, token_out, amount_in)
                .await
        };

        match result {
            Ok(out) => Some(out),
            Err(e) => {
                debug!("Quote failed on {} for {}/{}: {}", venue.name, asset_in, asset_out, e);
                None
            }
        }
    }

    async fn constant_product_out(
        &self,
        venue: &Venue,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
    ) -> Result<U256> {
        let path = [token_in, token_out];
        let data = self
            .call(venue.router, abi::encode_get_amounts_out(amount_in, &path))
            .await?;
        let amounts = abi::decode_amounts(&data)?;
        amounts
            .last()
            .copied()
            .context("getAmountsOut returned an empty array")
    }

    async fn simulate_concentrated(
        &self,
        venue: &Venue,
        token_in: Address,
        token_out: Address,
        amount_in: U256,
        asset_in: &str,
    ) -> Result<U256> {
        let deployer = self.pool_deployer(venue).await;
        let deadline = U256::from(chrono::Utc::now().timestamp() + 300);
        let data = abi::encode_exact_input_single(
            token_in,
            token_out,
            deployer,
            self.caller,
            deadline,
            amount_in,
            U256::ZERO,
            U256::ZERO,
        );

        let mut tx = TransactionRequest::default()
            .from(self.caller)
            .to(venue.router)
            .input(data.into());
        if config::is_native(asset_in) {
            tx = tx.value(amount_in);
        }

        let result = tokio::time::timeout(
            Duration::from_secs(QUOTE_TIMEOUT_SECS),
            self.provider.call(&tx),
        )
        .await
        .context("eth_call timed out")??;
        abi::decode_u256(&result)
    }

    /// Full quote with the price normalized for asset decimals. None
    /// for unquotable pairs and degenerate amounts, which callers treat
    /// as the venue being absent for the pair.
    pub async fn quote(
        &self,
        venue: &Venue,
        asset_in: &str,
        asset_out: &str,
        amount_in: U256,
    ) -> Option<Quote> {
        let amount_out = self.amount_out(venue, asset_in, asset_out, amount_in).await?;
        let decimals_in = self.decimals(asset_in).await;
        let decimals_out = self.decimals(asset_out).await;
        Quote::compute(amount_in, amount_out, decimals_in, decimals_out)
    }
}
