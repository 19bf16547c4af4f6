//! Venue tables, token addresses and trading pairs

use alloy::primitives::{Address, address};

use crate::types::{Venue, VenueKind};

pub const NATIVE_SYMBOL: &str = "MON";

/// Canonical wrapped form of the native asset. Venues that expose a
/// WETH()/WNativeToken() accessor may override this per router.
pub const WRAPPED_MON: Address = address!("760afe86e5de5fa0ee542fc7b7b713e1c5425701");

pub const USDC: Address = address!("f817257fed379853cde0fa4f97ab987181b1e5ea");

/// Venues in priority order. Order matters: ties during sell-venue
/// selection resolve to the earliest entry here.
pub const VENUES: &[Venue] = &[
    Venue {
        name: "hakifi",
        router: address!("398ac3b5d6c8279ea32ed05ca2b8331132afcebe"),
        kind: VenueKind::ConstantProduct,
    },
    Venue {
        name: "bean",
        router: address!("ca810d095e90daae6e867c19df6d9a8c56db2c89"),
        kind: VenueKind::ConstantProduct,
    },
    Venue {
        name: "monda",
        router: address!("c80585f78a6e44fb46e1445006f820448840386e"),
        kind: VenueKind::ConstantProduct,
    },
    Venue {
        name: "octo",
        router: address!("b6091233aacacba45225a2b2121bbac807af4255"),
        kind: VenueKind::ConstantProduct,
    },
    Venue {
        name: "madness",
        router: address!("64aff7245ebdaaecaf266852139c67e4d8dba4de"),
        kind: VenueKind::ConstantProduct,
    },
];

/// Known assets. The native asset has no contract address; it is
/// wrapped transparently by the routers.
pub const TOKENS: &[(&str, Option<Address>)] = &[
    (NATIVE_SYMBOL, None),
    ("USDC", Some(USDC)),
];

/// Pairs evaluated each cycle, as (asset_in, asset_out).
pub const TOKEN_PAIRS: &[(&str, &str)] = &[(NATIVE_SYMBOL, "USDC")];

pub fn venue(name: &str) -> Option<&'static Venue> {
    VENUES.iter().find(|v| v.name == name)
}

pub fn token_address(symbol: &str) -> Option<Address> {
    TOKENS
        .iter()
        .find(|(name, _)| *name == symbol)
        .and_then(|(_, addr)| *addr)
}

pub fn is_native(symbol: &str) -> bool {
    symbol == NATIVE_SYMBOL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn venue_lookup_by_name() {
        assert_eq!(venue("monda").map(|v| v.router), Some(address!("c80585f78a6e44fb46e1445006f820448840386e")));
        assert!(venue("unknown").is_none());
    }

    #[test]
    fn native_asset_has_no_address() {
        assert!(token_address(NATIVE_SYMBOL).is_none());
        assert_eq!(token_address("USDC"), Some(USDC));
    }
}
