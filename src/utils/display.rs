//! Display and printing utilities

use tracing::{error, info, warn};

use crate::types::{Opportunity, PriceMap, RunStats, TradeRecord, TradeStatus};

pub fn print_price_map(prices: &PriceMap) {
    for ((asset_in, asset_out), venues) in prices {
        info!("💱 {}/{}:", asset_in, asset_out);
        for (venue, price) in venues {
            info!("   {}: {:.6}", venue, price);
        }
    }
}

pub fn print_opportunity(opportunity: &Opportunity) {
    warn!("\n🎯 {} OPPORTUNITY #{}", opportunity.mode, opportunity.id);
    warn!("📍 Route: {}", opportunity.route());
    warn!("💰 Profit Analysis:");
    warn!("   Trade amount: {:.6} {}", opportunity.trade_amount, opportunity.asset_in);
    warn!("   Middle amount: {:.6} {}", opportunity.middle_amount, opportunity.asset_out);
    warn!("   Recovered: {:.6} {}", opportunity.recovered_amount, opportunity.asset_in);
    warn!("   Expected profit: {:.6} ({:.3}%)",
        opportunity.expected_profit,
        opportunity.expected_profit_pct
    );
}

pub fn print_trade_record(record: &TradeRecord) {
    match record.status {
        TradeStatus::Success => {
            warn!("\n✅ TRADE COMPLETE ({})", record.mode);
            warn!("📍 Route: {} -> {} via {} / {}",
                record.asset_in, record.asset_out, record.sell_venue, record.buy_venue);
            warn!("   Amount: {:.6} {}", record.amount, record.asset_in);
            warn!("   Realized profit: {:.6} ({:.3}%)", record.profit, record.profit_pct);
            warn!("   Net after gas: {:.6}", record.net_profit);
            if let Some(hash) = &record.sell_tx_hash {
                warn!("   Leg 1 tx: {}", hash);
            }
            if let Some(hash) = &record.buy_tx_hash {
                warn!("   Leg 2 tx: {}", hash);
            }
        }
        TradeStatus::Failed => {
            error!("\n❌ TRADE FAILED ({})", record.mode);
            error!("📍 Route: {} -> {} via {} / {}",
                record.asset_in, record.asset_out, record.sell_venue, record.buy_venue);
            if let Some(hash) = &record.sell_tx_hash {
                error!("   Leg 1 tx: {}", hash);
            }
            error!("   Error: {}", record.error.as_deref().unwrap_or("unknown"));
        }
    }
}

pub fn print_session_stats(stats: &RunStats) {
    let runtime = (stats.last_updated - stats.start_time).num_minutes();

    info!("\n📊 Session Statistics ({} minutes)", runtime);
    info!("   Total trades: {}", stats.total_trades);
    info!("   Successful: {}", stats.successful_trades);
    info!("   Failed: {}", stats.failed_trades);
    info!("   Success rate: {:.1}%",
        if stats.total_trades > 0 {
            (stats.successful_trades as f64 / stats.total_trades as f64) * 100.0
        } else {
            0.0
        }
    );
    info!("   Total profit: {:.6}", stats.total_profit);
    info!("   Average profit: {:.6}", stats.average_profit);
    info!("   Estimated gas spent: {:.6}", stats.total_gas_cost);
    info!("");
}
