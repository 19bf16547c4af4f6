//! On-chain execution of round trips

pub mod coordinator;
pub mod gas;
pub mod swap;

pub use coordinator::ExecutionCoordinator;
pub use gas::GasParams;
pub use swap::{SwapExecutor, SwapOutcome};
