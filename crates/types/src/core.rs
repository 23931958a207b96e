use std::convert::TryFrom;

use bytes::Bytes;
use ckb_fixed_hash::H256;

use crate::error::{Error, Result, ResultExt};
use crate::molecule::{
    decode_table, decode_variable_bytes, encode_fixed_bytes, encode_table,
    encode_variable_bytes, StructReader,
};
use crate::prelude::Entity;

pub const ONE_CKB: u64 = 100_000_000;
/// Size of the `capacity` field of a cell output.
pub const CAPACITY_SIZE: usize = 8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ScriptHashType {
    Data = 0,
    Type = 1,
}

impl From<ScriptHashType> for u8 {
    fn from(hash_type: ScriptHashType) -> u8 {
        hash_type as u8
    }
}

impl TryFrom<u8> for ScriptHashType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(ScriptHashType::Data),
            1 => Ok(ScriptHashType::Type),
            n => Err(Error::InvalidHashType {
                field: "value".to_string(),
                value: n,
            }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Script {
    pub code_hash: H256,
    pub hash_type: ScriptHashType,
    pub args: Bytes,
}

impl Script {
    pub fn new(code_hash: H256, hash_type: ScriptHashType, args: impl Into<Bytes>) -> Self {
        Script {
            code_hash,
            hash_type,
            args: args.into(),
        }
    }

    /// blake2b-256 of the serialized script.
    pub fn hash(&self) -> H256 {
        H256(gw_bridge_hash::hash(&self.as_bytes()))
    }

    /// Bytes the script occupies in a cell, `code_hash | hash_type | args`.
    pub fn occupied_bytes(&self) -> usize {
        32 + 1 + self.args.len()
    }
}

impl Entity for Script {
    const NAME: &'static str = "Script";

    fn as_bytes(&self) -> Bytes {
        let hash_type: u8 = self.hash_type.into();
        encode_table(&[
            self.code_hash.as_bytes(),
            &[hash_type][..],
            &encode_variable_bytes(&self.args)[..],
        ])
        .into()
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        let fields = decode_table(slice, 3)?;
        let code_hash = StructReader::new(fields[0], 32)
            .and_then(|mut r| r.read_array::<32>())
            .at("code_hash")?;
        let hash_type = match fields[1] {
            [byte] => ScriptHashType::try_from(*byte).at("hash_type")?,
            other => return Err(Error::length_mismatch(1, other.len()).at("hash_type")),
        };
        let args = decode_variable_bytes(fields[2]).at("args")?;
        Ok(Script {
            code_hash: H256(code_hash),
            hash_type,
            args: Bytes::copy_from_slice(args),
        })
    }
}

/// Parse a 32-byte hash given as raw bytes, failing on any other width.
pub fn h256_from_slice(slice: &[u8]) -> Result<H256> {
    let bytes = encode_fixed_bytes(slice, 32)?;
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&bytes);
    Ok(H256(hash))
}

/// Parse `0x`-prefixed hex of exactly `width` bytes.
pub fn parse_hex_fixed(value: &str, width: usize) -> Result<Vec<u8>> {
    let bytes = parse_hex(value)?;
    encode_fixed_bytes(&bytes, width)
}

/// Parse `0x`-prefixed hex of any length.
pub fn parse_hex(value: &str) -> Result<Vec<u8>> {
    let invalid = || Error::InvalidHex {
        field: "value".to_string(),
        value: value.to_string(),
    };
    let digits = value.strip_prefix("0x").ok_or_else(invalid)?;
    hex::decode(digits).map_err(|_| invalid())
}

/// Cell output, used for capacity calculation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellOutput {
    pub capacity: u64,
    pub lock: Script,
    pub type_: Option<Script>,
}

impl CellOutput {
    pub fn occupied_bytes(&self, data_len: usize) -> usize {
        CAPACITY_SIZE
            + self.lock.occupied_bytes()
            + self.type_.as_ref().map(Script::occupied_bytes).unwrap_or(0)
            + data_len
    }

    /// Minimal capacity in shannons to hold this cell with `data_len` bytes of data.
    pub fn occupied_capacity(&self, data_len: usize) -> u64 {
        self.occupied_bytes(data_len) as u64 * ONE_CKB
    }
}
