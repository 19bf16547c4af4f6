//! Router ABI plumbing and quote retrieval

pub mod abi;
pub mod caches;
pub mod client;

pub use caches::TokenCaches;
pub use client::QuoteClient;
