use ckb_fixed_hash::H160;

use crate::error::{AddressError, Result};

pub const ETH_ADDRESS_LEN: usize = 20;

/// Parse `0x` + 40 hex chars, case-insensitive.
pub fn parse_eth_address(address: &str) -> Result<H160> {
    let invalid = || AddressError::InvalidEthAddress(address.to_string());
    if address.len() != 2 + ETH_ADDRESS_LEN * 2 {
        return Err(invalid());
    }
    let digits = address.strip_prefix("0x").ok_or_else(invalid)?;
    let mut buf = [0u8; ETH_ADDRESS_LEN];
    hex::decode_to_slice(digits, &mut buf).map_err(|_| invalid())?;
    Ok(H160(buf))
}
