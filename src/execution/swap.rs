//! Single-leg swap submission
//!
//! One code path serves both legs and both venue kinds. Realized output
//! is always the post-transaction balance delta of the destination
//! asset; quoted amounts only set the slippage floor.

use alloy::{
    network::{EthereumWallet, TransactionBuilder},
    primitives::{Address, U256},
    providers::Provider,
    rpc::types::eth::TransactionRequest,
};
use rust_decimal::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::{
    config::{self, settings::EXECUTION_TIMEOUT_SECS, CONFIG},
    errors::{BotError, BotResult},
    execution::gas::{scale_gas_price, GasParams},
    quotes::{abi, QuoteClient},
    types::Venue,
    utils::math::wei_to_decimal,
    ConcreteProvider,
};

const DEADLINE_SECS: i64 = 300;

pub struct SwapOutcome {
    pub tx_hash: String,
    /// Realized output in human units of the destination asset.
    pub amount_out: Decimal,
    pub amount_out_wei: U256,
}

pub struct SwapExecutor {
    provider: Arc<ConcreteProvider>,
    wallet: EthereumWallet,
    address: Address,
    quotes: Arc<QuoteClient>,
}

/// Minimum acceptable output after the configured slippage tolerance,
/// in integer wei math.
pub fn min_out_with_slippage(expected_out: U256, slippage_pct: Decimal) -> U256 {
    let bps = (slippage_pct * Decimal::from(100))
        .to_u64()
        .unwrap_or(0)
        .min(10_000);
    expected_out * U256::from(10_000 - bps) / U256::from(10_000)
}

impl SwapExecutor {
    pub fn new(
        provider: Arc<ConcreteProvider>,
        wallet: EthereumWallet,
        address: Address,
        quotes: Arc<QuoteClient>,
    ) -> Self {
        Self { provider, wallet, address, quotes }
    }

    pub fn quotes(&self) -> &Arc<QuoteClient> {
        &self.quotes
    }

    pub async fn native_balance(&self) -> BotResult<U256> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| BotError::Network {
                message: "Failed to read native balance".to_string(),
                source: Some(e.into()),
                retry_count: 0,
            })
    }

    pub async fn token_balance(&self, token: Address) -> BotResult<U256> {
        let tx = TransactionRequest::default()
            .to(token)
            .input(abi::encode_balance_of(self.address).into());
        let data = self.provider.call(&tx).await.map_err(|e| BotError::Network {
            message: "Failed to read token balance".to_string(),
            source: Some(e.into()),
            retry_count: 0,
        })?;
        abi::decode_u256(&data).map_err(|e| BotError::Network {
            message: "Malformed balanceOf return".to_string(),
            source: Some(e),
            retry_count: 0,
        })
    }

    pub async fn asset_balance(&self, symbol: &str) -> BotResult<U256> {
        match config::token_address(symbol) {
            Some(token) => self.token_balance(token).await,
            None => self.native_balance().await,
        }
    }

    /// Grant the router an effectively unbounded allowance once; an
    /// existing nonzero allowance is reused as-is rather than renewed
    /// per trade.
    async fn ensure_allowance(
        &self,
        venue: &Venue,
        asset: &str,
        token: Address,
        gas: &GasParams,
    ) -> BotResult<()> {
        let data = abi::encode_allowance(self.address, venue.router);
        let tx = TransactionRequest::default().to(token).input(data.into());
        let current = self
            .provider
            .call(&tx)
            .await
            .ok()
            .and_then(|data| abi::decode_u256(&data).ok())
            .unwrap_or(U256::ZERO);

        if current > U256::ZERO {
            debug!("Allowance for {} on {} already set", asset, venue.name);
            return Ok(());
        }

        info!("🔓 Approving {} for {} router", asset, venue.name);
        let approve = abi::encode_approve(venue.router, U256::MAX);
        self.submit(venue.name, token, approve, U256::ZERO, gas)
            .await
            .map_err(|e| BotError::Approval {
                asset: asset.to_string(),
                venue: venue.name.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Sign and submit a transaction, then await its receipt. A mined
    /// but reverted transaction is reported as SwapReverted with its
    /// hash; everything before mining is SwapSubmission.
    async fn submit(
        &self,
        venue_name: &str,
        to: Address,
        data: Vec<u8>,
        value: U256,
        gas: &GasParams,
    ) -> BotResult<String> {
        let submission_err = |detail: String| BotError::SwapSubmission {
            venue: venue_name.to_string(),
            detail,
        };

        let nonce = self
            .provider
            .get_transaction_count(self.address)
            .await
            .map_err(|e| submission_err(format!("nonce fetch failed: {}", e)))?;
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .map_err(|e| submission_err(format!("gas price fetch failed: {}", e)))?;
        let fee = scale_gas_price(gas_price, gas.gas_price_multiplier);

        let tx = TransactionRequest::default()
            .from(self.address)
            .to(to)
            .input(data.into())
            .value(value)
            .nonce(nonce)
            .gas_limit(gas.gas_limit)
            .max_fee_per_gas(fee)
            .max_priority_fee_per_gas(fee)
            .with_chain_id(CONFIG.chain_id);

        let envelope = tx
            .build(&self.wallet)
            .await
            .map_err(|e| submission_err(format!("signing failed: {}", e)))?;
        let pending = self
            .provider
            .send_tx_envelope(envelope)
            .await
            .map_err(|e| submission_err(format!("broadcast failed: {}", e)))?;
        let tx_hash = format!("{:?}", pending.tx_hash());
        info!("📡 Transaction sent on {}: {}", venue_name, tx_hash);

        let receipt = tokio::select! {
            result = pending.get_receipt() => {
                result.map_err(|e| submission_err(format!("receipt wait failed: {}", e)))?
            }
            _ = tokio::time::sleep(Duration::from_secs(EXECUTION_TIMEOUT_SECS)) => {
                return Err(submission_err(format!(
                    "no receipt after {} seconds", EXECUTION_TIMEOUT_SECS
                )));
            }
        };

        if !receipt.status() {
            return Err(BotError::SwapReverted {
                venue: venue_name.to_string(),
                tx_hash,
            });
        }

        info!("✅ Transaction confirmed: {}", tx_hash);
        Ok(tx_hash)
    }

    /// Execute one leg: swap `amount_in` wei of `asset_in` into
    /// `asset_out` on the given venue. Always carries a slippage floor
    /// derived from a fresh quote; a leg that cannot be quoted is not
    /// submitted at all.
    pub async fn swap(
        &self,
        venue: &Venue,
        asset_in: &str,
        asset_out: &str,
        amount_in: U256,
        gas: &GasParams,
    ) -> BotResult<SwapOutcome> {
        let native_in = config::is_native(asset_in);
        let native_out = config::is_native(asset_out);

        let token_in = self
            .quotes
            .resolve_asset(venue, asset_in)
            .await
            .ok_or_else(|| BotError::SwapSubmission {
                venue: venue.name.to_string(),
                detail: format!("unknown asset {}", asset_in),
            })?;
        let token_out = self
            .quotes
            .resolve_asset(venue, asset_out)
            .await
            .ok_or_else(|| BotError::SwapSubmission {
                venue: venue.name.to_string(),
                detail: format!("unknown asset {}", asset_out),
            })?;

        let balance_in = self.asset_balance(asset_in).await?;
        if balance_in < amount_in {
            return Err(BotError::SwapSubmission {
                venue: venue.name.to_string(),
                detail: format!(
                    "insufficient {} balance: have {}, need {}",
                    asset_in, balance_in, amount_in
                ),
            });
        }

        let expected_out = self
            .quotes
            .amount_out(venue, asset_in, asset_out, amount_in)
            .await
            .ok_or_else(|| BotError::SwapSubmission {
                venue: venue.name.to_string(),
                detail: format!("no quote for {}/{} slippage floor", asset_in, asset_out),
            })?;
        let min_out = min_out_with_slippage(expected_out, CONFIG.slippage_tolerance_pct);

        if !native_in {
            self.ensure_allowance(venue, asset_in, token_in, gas).await?;
        }

        let balance_before = self.asset_balance(asset_out).await?;

        let deadline = U256::from(chrono::Utc::now().timestamp() + DEADLINE_SECS);
        let (data, value) = if venue.is_concentrated() {
            let deployer = self.quotes.pool_deployer(venue).await;
            let data = abi::encode_exact_input_single(
                token_in,
                token_out,
                deployer,
                self.address,
                deadline,
                amount_in,
                min_out,
                U256::ZERO,
            );
            (data, if native_in { amount_in } else { U256::ZERO })
        } else if native_in {
            let path = [token_in, token_out];
            (
                abi::encode_swap_exact_native_for_tokens(min_out, &path, self.address, deadline),
                amount_in,
            )
        } else if native_out {
            let path = [token_in, token_out];
            (
                abi::encode_swap_exact_tokens_for_native(
                    amount_in, min_out, &path, self.address, deadline,
                ),
                U256::ZERO,
            )
        } else {
            let path = [token_in, token_out];
            (
                abi::encode_swap_exact_tokens_for_tokens(
                    amount_in, min_out, &path, self.address, deadline,
                ),
                U256::ZERO,
            )
        };

        let tx_hash = self.submit(venue.name, venue.router, data, value, gas).await?;

        let balance_after = self.asset_balance(asset_out).await?;
        let amount_out_wei = balance_after.saturating_sub(balance_before);
        let decimals = self.quotes.decimals(asset_out).await;

        Ok(SwapOutcome {
            tx_hash,
            amount_out: wei_to_decimal(amount_out_wei, decimals),
            amount_out_wei,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn slippage_floor_scales_down() {
        let expected = U256::from(1_000_000u64);
        assert_eq!(min_out_with_slippage(expected, dec!(1.0)), U256::from(990_000u64));
        assert_eq!(min_out_with_slippage(expected, dec!(0.5)), U256::from(995_000u64));
    }

    #[test]
    fn zero_slippage_keeps_full_amount() {
        let expected = U256::from(777u64);
        assert_eq!(min_out_with_slippage(expected, Decimal::ZERO), expected);
    }

    #[test]
    fn full_slippage_floors_at_zero() {
        let expected = U256::from(777u64);
        assert_eq!(min_out_with_slippage(expected, dec!(100)), U256::ZERO);
    }
}
