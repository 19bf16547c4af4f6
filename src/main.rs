//! Monad Arbitrage Bot - Main Entry Point
//!
//! Cross-venue round-trip arbitrage and volume boosting on Monad testnet

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    providers::Provider,
    signers::local::PrivateKeySigner,
};
use anyhow::{Context, Result};
use monad_arb_bot::*;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let _logging_guard = utils::setup_logging()?;
    utils::setup_data_directories()?;

    let config = CONFIG.clone();
    let mode = if config.volume_boosting.enabled {
        types::TradeMode::VolumeBoosting
    } else {
        types::TradeMode::Arbitrage
    };

    info!("🤖 Monad Arbitrage Bot v0.3.0");
    info!("📋 Configuration:");
    info!("   RPC: {}", config.rpc_url);
    info!("   Chain ID: {}", config.chain_id);
    info!("   Mode: {}", mode);
    info!("   Slippage tolerance: {}%", config.slippage_tolerance_pct);
    match mode {
        types::TradeMode::Arbitrage => {
            info!("   Trade amount: {} {}", config.arbitrage.max_trade_amount, config::NATIVE_SYMBOL);
            info!("   Min profit threshold: {} {}", config.arbitrage.min_profit_threshold, config::NATIVE_SYMBOL);
            info!("   Trade interval: {}s", config.arbitrage.trade_interval_secs);
        }
        types::TradeMode::VolumeBoosting => {
            info!("   Target venue: {}", config.volume_boosting.target_venue);
            info!("   Loss tolerance: {}%", config.volume_boosting.loss_tolerance_pct);
            info!(
                "   Trade amount: {} - {} {}",
                config.volume_boosting.min_trade_amount,
                config.volume_boosting.max_trade_amount,
                config::NATIVE_SYMBOL
            );
            info!(
                "   Volume ceiling: {} {}",
                config.volume_boosting.volume_limit, config.settlement_asset
            );
            if config::venue(&config.volume_boosting.target_venue).is_none() {
                return Err(anyhow::anyhow!(
                    "Unknown target venue: {}",
                    config.volume_boosting.target_venue
                ));
            }
        }
    }

    let provider = network::setup_provider(&config).await?;
    let caches = Arc::new(quotes::TokenCaches::new());

    // Without a key the bot still prices and evaluates, it just never trades.
    let signer = match &config.private_key {
        Some(pk) => Some(PrivateKeySigner::from_str(pk).context("Failed to parse private key")?),
        None => {
            warn!("⚠️ PRIVATE_KEY not set, running in watch-only mode");
            None
        }
    };
    let account = signer.as_ref().map(|s| s.address()).unwrap_or(Address::ZERO);

    let client = Arc::new(quotes::QuoteClient::new(
        Arc::clone(&provider),
        Arc::clone(&caches),
        account,
    ));
    let aggregator = Arc::new(prices::PriceAggregator::new(Arc::clone(&client)));
    let evaluator = strategy::ArbitrageEvaluator::new(Arc::clone(&aggregator));

    let mut coordinator = signer.map(|s| {
        let wallet = EthereumWallet::from(s);
        execution::ExecutionCoordinator::new(execution::SwapExecutor::new(
            Arc::clone(&provider),
            wallet,
            account,
            Arc::clone(&client),
        ))
    });

    let mut ledger = storage::TradeLedger::load("data/trades")?;
    if !ledger.history().is_empty() {
        utils::print_session_stats(&ledger.stats());
    }

    // Startup liquidity probe: fail fast if no pair quotes anywhere.
    let reference_amount = match mode {
        types::TradeMode::Arbitrage => config.arbitrage.max_trade_amount,
        types::TradeMode::VolumeBoosting => {
            let (min, max) = config.volume_amount_bounds();
            (min + max) / rust_decimal_macros::dec!(2)
        }
    };
    info!("🔍 Probing venue liquidity...");
    let probe = aggregator.price_map(reference_amount).await;
    if probe.is_empty() {
        return Err(anyhow::anyhow!("No venue returned a valid quote for any configured pair"));
    }
    for (asset_in, asset_out) in config::TOKEN_PAIRS {
        if !probe.contains_key(&(asset_in.to_string(), asset_out.to_string())) {
            warn!("⚠️ No liquidity for {}/{}, pair will be skipped", asset_in, asset_out);
        }
    }
    utils::print_price_map(&probe);

    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let shutdown_tx = Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx)));
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("\n📛 Received shutdown signal (Ctrl+C)...");
            if let Some(tx) = shutdown_tx.lock().await.take() {
                let _ = tx.send(());
            }
        }
    });

    info!("\n🚀 Starting poll loop...\n");
    let mut interval = time::interval(Duration::from_secs(config.price_check_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let outcome = match mode {
                    types::TradeMode::Arbitrage => {
                        run_arbitrage_cycle(&evaluator, &provider, &mut coordinator, &mut ledger).await
                    }
                    types::TradeMode::VolumeBoosting => {
                        run_boosting_cycle(&aggregator, &provider, &mut coordinator, &mut ledger, reference_amount).await
                    }
                };
                match outcome {
                    Ok(CycleOutcome::Continue) => {}
                    Ok(CycleOutcome::Stop) => {
                        warn!("🏁 Volume ceiling reached, stopping for good");
                        break;
                    }
                    Err(e) => error!("Cycle error: {}", e),
                }
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting poll loop...");
                break;
            }
        }
    }

    ledger.save()?;
    utils::print_session_stats(&ledger.stats());
    Ok(())
}

enum CycleOutcome {
    Continue,
    Stop,
}

async fn run_arbitrage_cycle(
    evaluator: &strategy::ArbitrageEvaluator,
    provider: &Arc<ConcreteProvider>,
    coordinator: &mut Option<execution::ExecutionCoordinator>,
    ledger: &mut storage::TradeLedger,
) -> Result<CycleOutcome> {
    let opportunities = evaluator.evaluate_all().await;
    let Some(best) = opportunities.first() else {
        debug!("No arbitrage opportunities this cycle");
        return Ok(CycleOutcome::Continue);
    };
    utils::print_opportunity(best);

    let gas_price = provider.get_gas_price().await.context("Failed to fetch gas price")?;
    let gas_params = execution::GasParams::for_mode(types::TradeMode::Arbitrage);
    let estimated_gas = execution::gas::estimate_round_trip_cost(gas_price, &gas_params);

    // Final admission gate: the quoted edge must clear gas for both
    // legs and still exceed the minimum profit threshold.
    let profit_after_gas = best.expected_profit - estimated_gas;
    if profit_after_gas <= CONFIG.arbitrage.min_profit_threshold {
        info!(
            "⛽ Skipping: profit {:.6} after gas {:.6} below threshold",
            profit_after_gas, estimated_gas
        );
        return Ok(CycleOutcome::Continue);
    }

    let Some(coordinator) = coordinator.as_mut() else {
        info!("👀 Watch-only: would execute {}", best.route());
        return Ok(CycleOutcome::Continue);
    };

    let record = coordinator.execute(best, estimated_gas).await;
    utils::print_trade_record(&record);
    ledger.record(record)?;

    // settle-and-confirm delay before the next cycle
    tokio::time::sleep(Duration::from_secs(5)).await;
    Ok(CycleOutcome::Continue)
}

async fn run_boosting_cycle(
    aggregator: &Arc<prices::PriceAggregator>,
    provider: &Arc<ConcreteProvider>,
    coordinator: &mut Option<execution::ExecutionCoordinator>,
    ledger: &mut storage::TradeLedger,
    reference_amount: rust_decimal::Decimal,
) -> Result<CycleOutcome> {
    if let Some(coordinator) = coordinator.as_ref() {
        if let Err(e) = coordinator.check_volume_ceiling() {
            warn!("{}", e);
            ledger.save()?;
            return Ok(CycleOutcome::Stop);
        }
    }

    let price_map = aggregator.price_map(reference_amount).await;
    if price_map.is_empty() {
        debug!("No liquidity this cycle");
        return Ok(CycleOutcome::Continue);
    }

    let gas_price = provider.get_gas_price().await.context("Failed to fetch gas price")?;
    let gas_params = execution::GasParams::for_mode(types::TradeMode::VolumeBoosting);
    let estimated_gas = execution::gas::estimate_round_trip_cost(gas_price, &gas_params);

    let opportunities = strategy::VolumeBoostingEvaluator::evaluate(&price_map, estimated_gas);
    let Some(best) = opportunities.first() else {
        debug!("No boosting opportunity within loss tolerance");
        return Ok(CycleOutcome::Continue);
    };
    utils::print_opportunity(best);

    let Some(coordinator) = coordinator.as_mut() else {
        info!("👀 Watch-only: would execute {}", best.route());
        return Ok(CycleOutcome::Continue);
    };

    let record = coordinator.execute(best, estimated_gas).await;
    utils::print_trade_record(&record);
    ledger.record(record)?;

    tokio::time::sleep(Duration::from_secs(5)).await;
    Ok(CycleOutcome::Continue)
}
