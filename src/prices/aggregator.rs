//! Fan-out quoting across all venues for a fixed input amount

use alloy::primitives::U256;
use futures::future::join_all;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::debug;

use crate::{
    config,
    quotes::QuoteClient,
    types::{PriceMap, Quote, VenuePrices},
    utils::math::decimal_to_wei,
};

pub struct PriceAggregator {
    client: Arc<QuoteClient>,
}

/// Keep the quotes that came back valid, keyed by venue name. Quoting
/// order does not matter; the map is direction-scoped.
fn collect_valid(quotes: Vec<(&'static str, Option<Quote>)>) -> VenuePrices {
    quotes
        .into_iter()
        .filter_map(|(venue, quote)| quote.map(|q| (venue.to_string(), q.price)))
        .collect()
}

impl PriceAggregator {
    pub fn new(client: Arc<QuoteClient>) -> Self {
        Self { client }
    }

    /// Quote one direction on every venue concurrently. Returns None
    /// when no venue produced a valid quote, so the pair stays absent
    /// from the price map entirely.
    pub async fn aggregate_wei(
        &self,
        asset_in: &str,
        asset_out: &str,
        amount_in: U256,
    ) -> Option<VenuePrices> {
        let futures = config::VENUES.iter().map(|venue| {
            let client = Arc::clone(&self.client);
            async move {
                (venue.name, client.quote(venue, asset_in, asset_out, amount_in).await)
            }
        });

        let prices = collect_valid(join_all(futures).await);
        if prices.is_empty() {
            debug!("No valid quotes for {}/{}", asset_in, asset_out);
            None
        } else {
            Some(prices)
        }
    }

    /// Same as [`aggregate_wei`](Self::aggregate_wei) for a human-unit
    /// input amount.
    pub async fn aggregate(
        &self,
        asset_in: &str,
        asset_out: &str,
        amount_in: Decimal,
    ) -> Option<VenuePrices> {
        let decimals = self.client.decimals(asset_in).await;
        let wei = decimal_to_wei(amount_in, decimals);
        self.aggregate_wei(asset_in, asset_out, wei).await
    }

    /// Build the full per-cycle price map: every configured pair in both
    /// directions, quoted at the given reference amount of the forward
    /// input asset. Pairs without a single valid quote are left out.
    pub async fn price_map(&self, reference_amount: Decimal) -> PriceMap {
        let mut map = PriceMap::new();

        for (asset_in, asset_out) in config::TOKEN_PAIRS {
            if let Some(prices) = self.aggregate(asset_in, asset_out, reference_amount).await {
                // reverse direction priced at the forward notional value
                let forward_value = prices
                    .values()
                    .copied()
                    .max()
                    .map(|best| reference_amount * best);
                map.insert((asset_in.to_string(), asset_out.to_string()), prices);

                if let Some(value) = forward_value {
                    if let Some(reverse) = self.aggregate(asset_out, asset_in, value).await {
                        map.insert((asset_out.to_string(), asset_in.to_string()), reverse);
                    }
                }
            }
        }

        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quote(price: Decimal) -> Option<Quote> {
        Quote::compute(
            U256::from(1_000_000_000_000_000_000u128),
            crate::utils::math::decimal_to_wei(price, 18),
            18,
            18,
        )
    }

    #[test]
    fn invalid_quotes_are_dropped() {
        let prices = collect_valid(vec![
            ("hakifi", quote(dec!(2.0))),
            ("bean", None),
            ("monda", quote(dec!(2.1))),
        ]);
        assert_eq!(prices.len(), 2);
        assert_eq!(prices.get("monda"), Some(&dec!(2.1)));
        assert!(!prices.contains_key("bean"));
    }

    #[test]
    fn all_invalid_yields_empty() {
        let prices = collect_valid(vec![("hakifi", None), ("bean", None)]);
        assert!(prices.is_empty());
    }
}
