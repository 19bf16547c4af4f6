//! Cross-venue arbitrage evaluation

use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::{self, CONFIG},
    prices::PriceAggregator,
    strategy::select_sell_venue,
    types::{Opportunity, TradeMode, VenuePrices},
};

pub struct ArbitrageEvaluator {
    aggregator: Arc<PriceAggregator>,
}

/// One candidate per venue with a valid reverse price, excluding the
/// sell venue itself, admitted when the quoted round-trip profit
/// strictly exceeds the minimum threshold (an absolute amount in
/// asset_in units). Sorted by descending profit.
pub fn build_opportunities(
    venue_order: &[&str],
    asset_in: &str,
    asset_out: &str,
    trade_amount: Decimal,
    sell_venue: &str,
    middle_amount: Decimal,
    reverse: &VenuePrices,
    min_profit_threshold: Decimal,
) -> Vec<Opportunity> {
    let mut opportunities: Vec<Opportunity> = venue_order
        .iter()
        .filter_map(|venue| {
            if *venue == sell_venue {
                return None;
            }
            let price = reverse.get(*venue)?;
            let recovered = middle_amount * price;
            let profit = recovered - trade_amount;
            if profit <= min_profit_threshold {
                return None;
            }
            Some(Opportunity {
                id: Uuid::new_v4().to_string(),
                timestamp: Utc::now(),
                mode: TradeMode::Arbitrage,
                asset_in: asset_in.to_string(),
                asset_out: asset_out.to_string(),
                sell_venue: sell_venue.to_string(),
                buy_venue: venue.to_string(),
                trade_amount,
                middle_amount,
                recovered_amount: recovered,
                expected_profit: profit,
                expected_profit_pct: if trade_amount > Decimal::ZERO {
                    profit / trade_amount * dec!(100)
                } else {
                    Decimal::ZERO
                },
            })
        })
        .collect();

    opportunities.sort_by(|a, b| b.expected_profit.cmp(&a.expected_profit));
    opportunities
}

impl ArbitrageEvaluator {
    pub fn new(aggregator: Arc<PriceAggregator>) -> Self {
        Self { aggregator }
    }

    /// Evaluate one pair: sell at the best forward venue, then price the
    /// reverse leg with the middle amount that sale would yield. Returns
    /// an empty list when either direction has no valid quotes.
    pub async fn evaluate_pair(&self, asset_in: &str, asset_out: &str) -> Vec<Opportunity> {
        let trade_amount = CONFIG.arbitrage.max_trade_amount;
        let venue_order: Vec<&str> = config::VENUES.iter().map(|v| v.name).collect();

        let Some(forward) = self.aggregator.aggregate(asset_in, asset_out, trade_amount).await
        else {
            debug!("No forward liquidity for {}/{}", asset_in, asset_out);
            return Vec::new();
        };
        let Some((sell_venue, sell_price)) = select_sell_venue(&venue_order, &forward) else {
            return Vec::new();
        };

        let middle_amount = trade_amount * sell_price;
        let Some(reverse) = self.aggregator.aggregate(asset_out, asset_in, middle_amount).await
        else {
            debug!("No reverse liquidity for {}/{}", asset_out, asset_in);
            return Vec::new();
        };

        build_opportunities(
            &venue_order,
            asset_in,
            asset_out,
            trade_amount,
            sell_venue,
            middle_amount,
            &reverse,
            CONFIG.arbitrage.min_profit_threshold,
        )
    }

    /// Evaluate every configured pair in both directions, best
    /// opportunities first.
    pub async fn evaluate_all(&self) -> Vec<Opportunity> {
        let mut all = Vec::new();
        for (asset_in, asset_out) in config::TOKEN_PAIRS {
            all.extend(self.evaluate_pair(asset_in, asset_out).await);
            all.extend(self.evaluate_pair(asset_out, asset_in).await);
        }
        all.sort_by(|a, b| b.expected_profit.cmp(&a.expected_profit));
        all
    }
}
