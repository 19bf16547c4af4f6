//! Trade history persistence

pub mod ledger;

pub use ledger::TradeLedger;
