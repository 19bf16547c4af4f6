//! Manual ABI encoding for router calls
//!
//! Calldata is assembled word by word from keccak selectors rather than
//! through generated bindings. The router surface is small enough that
//! the explicit layout is easier to audit than a bindings layer.

use alloy::{
    primitives::{keccak256, Address, U256},
    sol_types::SolValue,
};
use anyhow::{Context, Result};

fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

fn push_u256(data: &mut Vec<u8>, value: U256) {
    data.extend_from_slice(&value.to_be_bytes::<32>());
}

fn push_address(data: &mut Vec<u8>, addr: Address) {
    data.extend_from_slice(addr.into_word().as_slice());
}

fn push_path(data: &mut Vec<u8>, path: &[Address]) {
    push_u256(data, U256::from(path.len()));
    for hop in path {
        push_address(data, *hop);
    }
}

/// getAmountsOut(uint256,address[])
pub fn encode_get_amounts_out(amount_in: U256, path: &[Address]) -> Vec<u8> {
    let mut data = selector("getAmountsOut(uint256,address[])").to_vec();
    push_u256(&mut data, amount_in);
    push_u256(&mut data, U256::from(64)); // offset of the path array
    push_path(&mut data, path);
    data
}

/// swapExactTokensForTokens(uint256,uint256,address[],address,uint256)
pub fn encode_swap_exact_tokens_for_tokens(
    amount_in: U256,
    min_out: U256,
    path: &[Address],
    to: Address,
    deadline: U256,
) -> Vec<u8> {
    let mut data =
        selector("swapExactTokensForTokens(uint256,uint256,address[],address,uint256)").to_vec();
    push_u256(&mut data, amount_in);
    push_u256(&mut data, min_out);
    push_u256(&mut data, U256::from(160)); // offset of the path array
    push_address(&mut data, to);
    push_u256(&mut data, deadline);
    push_path(&mut data, path);
    data
}

/// swapExactETHForTokens(uint256,address[],address,uint256)
///
/// The input amount rides as msg.value, not calldata.
pub fn encode_swap_exact_native_for_tokens(
    min_out: U256,
    path: &[Address],
    to: Address,
    deadline: U256,
) -> Vec<u8> {
    let mut data = selector("swapExactETHForTokens(uint256,address[],address,uint256)").to_vec();
    push_u256(&mut data, min_out);
    push_u256(&mut data, U256::from(128)); // offset of the path array
    push_address(&mut data, to);
    push_u256(&mut data, deadline);
    push_path(&mut data, path);
    data
}

/// swapExactTokensForETH(uint256,uint256,address[],address,uint256)
pub fn encode_swap_exact_tokens_for_native(
    amount_in: U256,
    min_out: U256,
    path: &[Address],
    to: Address,
    deadline: U256,
) -> Vec<u8> {
    let mut data =
        selector("swapExactTokensForETH(uint256,uint256,address[],address,uint256)").to_vec();
    push_u256(&mut data, amount_in);
    push_u256(&mut data, min_out);
    push_u256(&mut data, U256::from(160));
    push_address(&mut data, to);
    push_u256(&mut data, deadline);
    push_path(&mut data, path);
    data
}

/// Algebra exactInputSingle((address,address,address,address,uint256,uint256,uint256,uint160))
///
/// The params struct is entirely static so it encodes as 8 flat words,
/// no offset prefix. The third field is the pool deployer address that
/// concentrated routers resolve pools through.
#[allow(clippy::too_many_arguments)]
pub fn encode_exact_input_single(
    token_in: Address,
    token_out: Address,
    deployer: Address,
    recipient: Address,
    deadline: U256,
    amount_in: U256,
    amount_out_minimum: U256,
    limit_sqrt_price: U256,
) -> Vec<u8> {
    let mut data = selector(
        "exactInputSingle((address,address,address,address,uint256,uint256,uint256,uint160))",
    )
    .to_vec();
    push_address(&mut data, token_in);
    push_address(&mut data, token_out);
    push_address(&mut data, deployer);
    push_address(&mut data, recipient);
    push_u256(&mut data, deadline);
    push_u256(&mut data, amount_in);
    push_u256(&mut data, amount_out_minimum);
    push_u256(&mut data, limit_sqrt_price);
    data
}

/// approve(address,uint256)
pub fn encode_approve(spender: Address, amount: U256) -> Vec<u8> {
    let mut data = selector("approve(address,uint256)").to_vec();
    push_address(&mut data, spender);
    push_u256(&mut data, amount);
    data
}

/// allowance(address,address)
pub fn encode_allowance(owner: Address, spender: Address) -> Vec<u8> {
    let mut data = selector("allowance(address,address)").to_vec();
    push_address(&mut data, owner);
    push_address(&mut data, spender);
    data
}

/// balanceOf(address)
pub fn encode_balance_of(owner: Address) -> Vec<u8> {
    let mut data = selector("balanceOf(address)").to_vec();
    push_address(&mut data, owner);
    data
}

pub fn encode_decimals() -> Vec<u8> {
    selector("decimals()").to_vec()
}

pub fn encode_weth() -> Vec<u8> {
    selector("WETH()").to_vec()
}

pub fn encode_wnative_token() -> Vec<u8> {
    selector("WNativeToken()").to_vec()
}

pub fn encode_pool_deployer() -> Vec<u8> {
    selector("poolDeployer()").to_vec()
}

pub fn decode_amounts(data: &[u8]) -> Result<Vec<U256>> {
    <Vec<U256>>::abi_decode(data, true).context("Failed to decode uint256[] return")
}

pub fn decode_address(data: &[u8]) -> Result<Address> {
    Address::abi_decode(data, true).context("Failed to decode address return")
}

pub fn decode_u256(data: &[u8]) -> Result<U256> {
    U256::abi_decode(data, true).context("Failed to decode uint256 return")
}

pub fn decode_u8(data: &[u8]) -> Result<u8> {
    let value = U256::abi_decode(data, true).context("Failed to decode uint8 return")?;
    u8::try_from(value).map_err(|_| anyhow::anyhow!("uint8 return out of range: {}", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const A: Address = address!("1111111111111111111111111111111111111111");
    const B: Address = address!("2222222222222222222222222222222222222222");

    #[test]
    fn get_amounts_out_layout() {
        let data = encode_get_amounts_out(U256::from(1000), &[A, B]);
        // selector + amount + offset + len + 2 hops
        assert_eq!(data.len(), 4 + 32 * 5);
        assert_eq!(&data[..4], &keccak256("getAmountsOut(uint256,address[])")[..4]);
        assert_eq!(U256::from_be_slice(&data[4..36]), U256::from(1000));
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(64));
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::from(2));
    }

    #[test]
    fn swap_exact_tokens_path_offset() {
        let data = encode_swap_exact_tokens_for_tokens(
            U256::from(10),
            U256::from(9),
            &[A, B],
            B,
            U256::from(1234),
        );
        assert_eq!(data.len(), 4 + 32 * 8);
        // path offset points past the five head words
        assert_eq!(U256::from_be_slice(&data[68..100]), U256::from(160));
        assert_eq!(&data[112..132], B.as_slice()); // recipient word
        assert_eq!(U256::from_be_slice(&data[164..196]), U256::from(2));
        assert_eq!(&data[208..228], A.as_slice()); // first hop
    }

    #[test]
    fn native_swap_carries_no_amount_word() {
        let data = encode_swap_exact_native_for_tokens(U256::from(9), &[A, B], B, U256::from(1));
        assert_eq!(data.len(), 4 + 32 * 7);
        assert_eq!(U256::from_be_slice(&data[36..68]), U256::from(128));
    }

    #[test]
    fn exact_input_single_is_static() {
        let data = encode_exact_input_single(
            A,
            B,
            Address::ZERO,
            B,
            U256::from(99),
            U256::from(1000),
            U256::ZERO,
            U256::ZERO,
        );
        assert_eq!(data.len(), 4 + 32 * 8);
        assert_eq!(&data[16..36], A.as_slice());
        assert_eq!(U256::from_be_slice(&data[4 + 32 * 4..4 + 32 * 5]), U256::from(99));
    }

    #[test]
    fn decimals_decode_as_narrow_uint() {
        let encoded = U256::from(6).abi_encode();
        assert_eq!(decode_u8(&encoded).unwrap(), 6);

        let too_wide = U256::from(300).abi_encode();
        assert!(decode_u8(&too_wide).is_err());
    }

    #[test]
    fn amounts_decode_round_trip() {
        let amounts = vec![U256::from(5), U256::from(7)];
        let encoded = amounts.abi_encode();
        assert_eq!(decode_amounts(&encoded).unwrap(), amounts);
    }
}
