//! Monad DEX Arbitrage Bot - cross-venue round-trip trading for Monad testnet
//!
//! This bot polls a fixed set of DEX routers for swap prices of configured
//! token pairs, detects profitable two-leg round trips between venues, and
//! executes the corresponding swaps on-chain. A loss-tolerant volume-boosting
//! mode routes the buy-back leg through a fixed target venue instead.

pub mod config;
pub mod types;
pub mod errors;
pub mod network;
pub mod quotes;
pub mod prices;
pub mod strategy;
pub mod execution;
pub mod storage;
pub mod utils;

// Re-export commonly used items
pub use config::{Config, CONFIG};
pub use errors::{BotError, BotResult};
pub use types::*;

// Type alias for our concrete provider
pub type ConcreteProvider = alloy::providers::RootProvider<alloy::transports::BoxTransport>;
