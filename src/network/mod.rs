//! Network connectivity

pub mod providers;
pub mod retry;

pub use providers::*;
pub use retry::*;
