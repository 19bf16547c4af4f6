//! Custom error types for the bot
//!
//! Invalid quotes and empty evaluation results are NOT errors: they are
//! Option/empty-Vec outcomes handled locally. Errors here are the cases
//! that abort an in-flight operation and need to be told apart in the
//! trade record: approval failures, submission failures, mined-but-reverted
//! swaps, and the terminal volume ceiling.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BotError {
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        retry_count: u32,
    },

    #[error("Approval of {asset} for {venue} router failed: {reason}")]
    Approval {
        asset: String,
        venue: String,
        reason: String,
    },

    #[error("Swap submission failed on {venue}: {detail}")]
    SwapSubmission { venue: String, detail: String },

    #[error("Swap reverted on {venue} (tx {tx_hash})")]
    SwapReverted { venue: String, tx_hash: String },

    #[error("Volume ceiling reached: {traded} >= {limit}")]
    VolumeCeilingReached { traded: Decimal, limit: Decimal },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type BotResult<T> = Result<T, BotError>;

impl BotError {
    /// Transaction hash of a mined-but-reverted leg, if this failure
    /// produced one.
    pub fn tx_hash(&self) -> Option<&str> {
        match self {
            BotError::SwapReverted { tx_hash, .. } => Some(tx_hash),
            _ => None,
        }
    }
}
