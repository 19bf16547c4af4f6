//! Core data types and structures

pub mod venue;
pub mod quote;
pub mod opportunity;
pub mod trade;
pub mod stats;

pub use venue::*;
pub use quote::*;
pub use opportunity::*;
pub use trade::*;
pub use stats::*;
