//! Cross-venue price aggregation

pub mod aggregator;

pub use aggregator::PriceAggregator;
