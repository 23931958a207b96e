use std::convert::TryFrom;

use bech32::{convert_bits, ToBase32, Variant};
use ckb_fixed_hash::{h256, H256};
use gw_bridge_config::{AddressFormat, NetworkType};
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::{Script, ScriptHashType};

use crate::error::{AddressError, Result};

pub const SIGHASH_TYPE_HASH: H256 =
    h256!("0x9bd7e06f3ecf4be0f2fcd2188b23f1b9fcc88e5d4b65a8637b17723bbda3cce8");
pub const MULTISIG_TYPE_HASH: H256 =
    h256!("0x5c5069eb0857efc65e1bca0c07df34c31663b3622fd3876c876320fc9634e2a8");
/// anyone can pay script mainnet code hash
pub const ACP_TYPE_HASH_LINA: H256 =
    h256!("0xd369597ff47f29fbc0d47d2e3775370d1250b85140c670e4718af712983a2354");
/// anyone can pay script testnet code hash
pub const ACP_TYPE_HASH_AGGRON: H256 =
    h256!("0x3419a1c09eb2567f6552ee7a8ecffd64155cffe0f1796e6e61ec088d740c1356");

/// Converts lock scripts to and from Layer 1 address strings.
pub trait AddressCodec {
    fn encode(&self, script: &Script, network: NetworkType) -> Result<String>;

    fn decode(&self, address: &str) -> Result<(NetworkType, Script)>;
}

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum AddressType {
    // full version identifies the hash_type and vm_version
    Full = 0x00,
    // short version for locks with popular code_hash, deprecated
    Short = 0x01,
    // full version with hash_type = "Data", deprecated
    FullData = 0x02,
    // full version with hash_type = "Type", deprecated
    FullType = 0x04,
}

impl AddressType {
    pub fn from_u8(value: u8) -> Option<AddressType> {
        match value {
            0x00 => Some(AddressType::Full),
            0x01 => Some(AddressType::Short),
            0x02 => Some(AddressType::FullData),
            0x04 => Some(AddressType::FullType),
            _ => None,
        }
    }
}

#[derive(Hash, Eq, PartialEq, Debug, Clone, Copy)]
#[repr(u8)]
pub enum CodeHashIndex {
    /// SECP256K1 + blake160, args: `blake160(PK)`
    Sighash = 0x00,
    /// SECP256K1 + multisig, args: `multisig script hash`
    Multisig = 0x01,
    /// anyone_can_pay, args: `blake160(PK)`
    Acp = 0x02,
}

impl CodeHashIndex {
    pub fn from_u8(value: u8) -> Option<CodeHashIndex> {
        match value {
            0x00 => Some(CodeHashIndex::Sighash),
            0x01 => Some(CodeHashIndex::Multisig),
            0x02 => Some(CodeHashIndex::Acp),
            _ => None,
        }
    }

    pub fn code_hash(self, network: NetworkType) -> H256 {
        match self {
            CodeHashIndex::Sighash => SIGHASH_TYPE_HASH,
            CodeHashIndex::Multisig => MULTISIG_TYPE_HASH,
            CodeHashIndex::Acp => match network {
                NetworkType::Mainnet => ACP_TYPE_HASH_LINA,
                NetworkType::Testnet => ACP_TYPE_HASH_AGGRON,
            },
        }
    }

    /// The index of a lock that has a short address.
    pub fn from_script(script: &Script, network: NetworkType) -> Option<CodeHashIndex> {
        if script.hash_type != ScriptHashType::Type || script.args.len() != 20 {
            return None;
        }
        [
            CodeHashIndex::Sighash,
            CodeHashIndex::Multisig,
            CodeHashIndex::Acp,
        ]
        .into_iter()
        .find(|index| index.code_hash(network) == script.code_hash)
    }
}

/// CKB address codec, RFC21.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CkbAddressCodec {
    format: AddressFormat,
}

impl CkbAddressCodec {
    pub fn new(format: AddressFormat) -> Self {
        CkbAddressCodec { format }
    }

    pub fn format(&self) -> AddressFormat {
        self.format
    }
}

impl Default for CkbAddressCodec {
    fn default() -> Self {
        Self::new(AddressFormat::Full)
    }
}

impl AddressCodec for CkbAddressCodec {
    fn encode(&self, script: &Script, network: NetworkType) -> Result<String> {
        let args = &script.args;
        let (data, variant) = match self.format {
            AddressFormat::Full => {
                // payload = 0x00 | code_hash | hash_type | args
                let mut data = vec![0u8; 34 + args.len()];
                data[0] = AddressType::Full as u8;
                data[1..33].copy_from_slice(script.code_hash.as_bytes());
                data[33] = script.hash_type as u8;
                data[34..].copy_from_slice(args);
                (data, Variant::Bech32m)
            }
            AddressFormat::Deprecated => match CodeHashIndex::from_script(script, network) {
                // payload = 0x01 | code_hash_index | args
                Some(index) => {
                    let mut data = vec![0u8; 22];
                    data[0] = AddressType::Short as u8;
                    data[1] = index as u8;
                    data[2..].copy_from_slice(args);
                    (data, Variant::Bech32)
                }
                // payload = 0x02/0x04 | code_hash | args
                None => {
                    let ty = match script.hash_type {
                        ScriptHashType::Data => AddressType::FullData,
                        ScriptHashType::Type => AddressType::FullType,
                    };
                    let mut data = vec![0u8; 33 + args.len()];
                    data[0] = ty as u8;
                    data[1..33].copy_from_slice(script.code_hash.as_bytes());
                    data[33..].copy_from_slice(args);
                    (data, Variant::Bech32)
                }
            },
        };
        bech32::encode(network.to_prefix(), data.to_base32(), variant)
            .map_err(|err| AddressError::invalid_address("", err))
    }

    fn decode(&self, address: &str) -> Result<(NetworkType, Script)> {
        let invalid = |reason: &str| AddressError::invalid_address(address, reason);

        let (hrp, data, variant) =
            bech32::decode(address).map_err(|err| AddressError::invalid_address(address, err))?;
        let network = NetworkType::from_prefix(&hrp)
            .ok_or_else(|| invalid(&format!("unknown hrp {}", hrp)))?;
        let data = convert_bits(&data, 5, 8, false)
            .map_err(|err| AddressError::invalid_address(address, err))?;
        let ty = data
            .first()
            .copied()
            .and_then(AddressType::from_u8)
            .ok_or_else(|| invalid("unknown address type"))?;

        let script = match ty {
            // payload = 0x01 | code_hash_index | args
            AddressType::Short => {
                if variant != Variant::Bech32 {
                    return Err(invalid("short address must use bech32 encoding"));
                }
                if data.len() != 22 {
                    return Err(invalid(&format!("invalid data length {}", data.len())));
                }
                let index = CodeHashIndex::from_u8(data[1])
                    .ok_or_else(|| invalid(&format!("invalid code hash index {}", data[1])))?;
                Script::new(
                    index.code_hash(network),
                    ScriptHashType::Type,
                    Bytes::copy_from_slice(&data[2..]),
                )
            }
            // payload = 0x02/0x04 | code_hash | args
            AddressType::FullData | AddressType::FullType => {
                if variant != Variant::Bech32 {
                    return Err(invalid(
                        "non-ckb2021 format full address must use bech32 encoding",
                    ));
                }
                if data.len() < 33 {
                    return Err(invalid(&format!("insufficient data length {}", data.len())));
                }
                let hash_type = if ty == AddressType::FullData {
                    ScriptHashType::Data
                } else {
                    ScriptHashType::Type
                };
                let mut code_hash = [0u8; 32];
                code_hash.copy_from_slice(&data[1..33]);
                Script::new(
                    H256(code_hash),
                    hash_type,
                    Bytes::copy_from_slice(&data[33..]),
                )
            }
            // payload = 0x00 | code_hash | hash_type | args
            AddressType::Full => {
                if variant != Variant::Bech32m {
                    return Err(invalid("ckb2021 format full address must use bech32m encoding"));
                }
                if data.len() < 34 {
                    return Err(invalid(&format!("insufficient data length {}", data.len())));
                }
                let mut code_hash = [0u8; 32];
                code_hash.copy_from_slice(&data[1..33]);
                let hash_type = ScriptHashType::try_from(data[33])
                    .map_err(|err| AddressError::Codec(err.at("hash_type")))?;
                Script::new(
                    H256(code_hash),
                    hash_type,
                    Bytes::copy_from_slice(&data[34..]),
                )
            }
        };
        Ok((network, script))
    }
}
