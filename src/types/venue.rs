//! Venue definitions
//!
//! A venue is one configured DEX router able to quote and execute swaps.
//! The kind tag selects the quoting/execution interface: `ConstantProduct`
//! venues speak the Uniswap V2 router ABI (`getAmountsOut`, `swapExact*`),
//! `Concentrated` venues speak the Algebra router ABI (`exactInputSingle`
//! with a pool-deployer field).

use alloy::primitives::Address;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VenueKind {
    ConstantProduct,
    Concentrated,
}

#[derive(Debug, Clone, Copy)]
pub struct Venue {
    pub name: &'static str,
    pub router: Address,
    pub kind: VenueKind,
}

impl Venue {
    pub fn is_concentrated(&self) -> bool {
        self.kind == VenueKind::Concentrated
    }
}
