use bytes::Bytes;
use ckb_fixed_hash::H256;
use serde::{Deserialize, Serialize};

use crate::core::{h256_from_slice, Script};
use crate::error::{Error, Result, ResultExt};
use crate::molecule::{
    decode_table, decode_variable_bytes, encode_table, encode_variable_bytes, StructReader,
};
use crate::prelude::{Entity, FixedSize};

fn encode_struct(fields: &[&[u8]]) -> Bytes {
    fields.concat().into()
}

/// Withdrawal lock args of the legacy finality lock, an 8-field table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalLockArgs {
    pub account_script_hash: H256,
    pub withdrawal_block_hash: H256,
    pub withdrawal_block_number: u64,
    pub sudt_script_hash: H256,
    pub sell_amount: u128,
    pub sell_capacity: u64,
    pub owner_lock_hash: H256,
    pub payment_lock_hash: H256,
}

impl WithdrawalLockArgs {
    fn decode(slice: &[u8]) -> Result<Self> {
        let fields = decode_table(slice, 8)?;
        let u64_field = |i: usize, name: &str| {
            StructReader::new(fields[i], 8)
                .and_then(|mut r| r.read_u64())
                .at(name)
        };
        Ok(WithdrawalLockArgs {
            account_script_hash: h256_from_slice(fields[0]).at("account_script_hash")?,
            withdrawal_block_hash: h256_from_slice(fields[1]).at("withdrawal_block_hash")?,
            withdrawal_block_number: u64_field(2, "withdrawal_block_number")?,
            sudt_script_hash: h256_from_slice(fields[3]).at("sudt_script_hash")?,
            sell_amount: StructReader::new(fields[4], 16)
                .and_then(|mut r| r.read_u128())
                .at("sell_amount")?,
            sell_capacity: u64_field(5, "sell_capacity")?,
            owner_lock_hash: h256_from_slice(fields[6]).at("owner_lock_hash")?,
            payment_lock_hash: h256_from_slice(fields[7]).at("payment_lock_hash")?,
        })
    }
}

impl Entity for WithdrawalLockArgs {
    const NAME: &'static str = "WithdrawalLockArgs";

    fn as_bytes(&self) -> Bytes {
        encode_table(&[
            self.account_script_hash.as_bytes(),
            self.withdrawal_block_hash.as_bytes(),
            &self.withdrawal_block_number.to_le_bytes()[..],
            self.sudt_script_hash.as_bytes(),
            &self.sell_amount.to_le_bytes()[..],
            &self.sell_capacity.to_le_bytes()[..],
            self.owner_lock_hash.as_bytes(),
            self.payment_lock_hash.as_bytes(),
        ])
        .into()
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::decode(slice).at("withdrawal_lock_args")
    }
}

/// Withdrawal lock args since Godwoken v1, a fixed struct.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalLockArgsV1 {
    pub account_script_hash: H256,
    pub withdrawal_block_hash: H256,
    pub withdrawal_block_number: u64,
    pub owner_lock_hash: H256,
}

impl FixedSize for WithdrawalLockArgsV1 {
    const SIZE: usize = 32 + 32 + 8 + 32;
}

impl Entity for WithdrawalLockArgsV1 {
    const NAME: &'static str = "WithdrawalLockArgsV1";

    fn as_bytes(&self) -> Bytes {
        encode_struct(&[
            self.account_script_hash.as_bytes(),
            self.withdrawal_block_hash.as_bytes(),
            &self.withdrawal_block_number.to_le_bytes()[..],
            self.owner_lock_hash.as_bytes(),
        ])
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        let mut reader = StructReader::new(slice, Self::SIZE).at("withdrawal_lock_args")?;
        Ok(WithdrawalLockArgsV1 {
            account_script_hash: H256(reader.read_array()?),
            withdrawal_block_hash: H256(reader.read_array()?),
            withdrawal_block_number: reader.read_u64()?,
            owner_lock_hash: H256(reader.read_array()?),
        })
    }
}

/// Parsed args of a v1 withdrawal cell lock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedWithdrawalLockArgs {
    pub rollup_type_hash: H256,
    pub lock_args: WithdrawalLockArgsV1,
    pub owner_lock: Script,
}

/// Build v1 withdrawal lock args,
/// `rollup_type_hash | lock_args | u32_be(owner_lock len) | owner_lock`.
pub fn build_withdrawal_lock_args(
    rollup_type_hash: &H256,
    lock_args: &WithdrawalLockArgsV1,
    owner_lock: &Script,
) -> Bytes {
    let owner_lock = owner_lock.as_bytes();
    let mut args = Vec::with_capacity(32 + WithdrawalLockArgsV1::SIZE + 4 + owner_lock.len());
    args.extend_from_slice(rollup_type_hash.as_bytes());
    args.extend_from_slice(&lock_args.as_bytes());
    args.extend_from_slice(&(owner_lock.len() as u32).to_be_bytes());
    args.extend_from_slice(&owner_lock);
    Bytes::from(args)
}

pub fn parse_withdrawal_lock_args(args: &[u8]) -> Result<ParsedWithdrawalLockArgs> {
    let lock_args_start = 32;
    let lock_args_end = lock_args_start + WithdrawalLockArgsV1::SIZE;
    let owner_lock_start = lock_args_end + 4;
    if args.len() <= owner_lock_start {
        return Err(Error::malformed(format!(
            "withdrawal lock args of {} bytes too short",
            args.len()
        )));
    }

    let rollup_type_hash = h256_from_slice(&args[..lock_args_start]).at("rollup_type_hash")?;
    let lock_args = WithdrawalLockArgsV1::from_slice(&args[lock_args_start..lock_args_end])?;

    let mut owner_lock_len_buf = [0u8; 4];
    owner_lock_len_buf.copy_from_slice(&args[lock_args_end..owner_lock_start]);
    let owner_lock_len = u32::from_be_bytes(owner_lock_len_buf) as usize;
    if owner_lock_start + owner_lock_len != args.len() {
        return Err(Error::LengthMismatch {
            field: "owner_lock".to_string(),
            expected: owner_lock_len,
            actual: args.len() - owner_lock_start,
        });
    }

    let owner_lock = Script::from_slice(&args[owner_lock_start..]).at("owner_lock")?;
    if owner_lock.hash() != lock_args.owner_lock_hash {
        return Err(Error::MalformedTable {
            field: "owner_lock".to_string(),
            reason: "owner lock hash mismatch".to_string(),
        });
    }

    Ok(ParsedWithdrawalLockArgs {
        rollup_type_hash,
        lock_args,
        owner_lock,
    })
}

/// Split legacy withdrawal lock args, `rollup_type_hash | table`.
pub fn parse_legacy_withdrawal_lock_args(args: &[u8]) -> Result<(H256, WithdrawalLockArgs)> {
    if args.len() < 32 {
        return Err(Error::length_mismatch(32, args.len()).at("rollup_type_hash"));
    }
    let rollup_type_hash = h256_from_slice(&args[..32])?;
    let lock_args = WithdrawalLockArgs::from_slice(&args[32..])?;
    Ok((rollup_type_hash, lock_args))
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawWithdrawalRequest {
    pub nonce: u32,
    pub chain_id: u64,
    /// CKB amount in shannons
    pub capacity: u64,
    /// SUDT amount
    pub amount: u128,
    pub sudt_script_hash: H256,
    /// layer2 account to withdraw from
    pub account_script_hash: H256,
    pub registry_id: u32,
    /// layer1 lock to withdraw after challenge period
    pub owner_lock_hash: H256,
    pub fee: u128,
}

impl FixedSize for RawWithdrawalRequest {
    const SIZE: usize = 4 + 8 + 8 + 16 + 32 + 32 + 4 + 32 + 16;
}

impl Entity for RawWithdrawalRequest {
    const NAME: &'static str = "RawWithdrawalRequest";

    fn as_bytes(&self) -> Bytes {
        encode_struct(&[
            &self.nonce.to_le_bytes()[..],
            &self.chain_id.to_le_bytes()[..],
            &self.capacity.to_le_bytes()[..],
            &self.amount.to_le_bytes()[..],
            self.sudt_script_hash.as_bytes(),
            self.account_script_hash.as_bytes(),
            &self.registry_id.to_le_bytes()[..],
            self.owner_lock_hash.as_bytes(),
            &self.fee.to_le_bytes()[..],
        ])
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        let mut r = StructReader::new(slice, Self::SIZE).at("raw_withdrawal_request")?;
        Ok(RawWithdrawalRequest {
            nonce: r.read_u32()?,
            chain_id: r.read_u64()?,
            capacity: r.read_u64()?,
            amount: r.read_u128()?,
            sudt_script_hash: H256(r.read_array()?),
            account_script_hash: H256(r.read_array()?),
            registry_id: r.read_u32()?,
            owner_lock_hash: H256(r.read_array()?),
            fee: r.read_u128()?,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WithdrawalRequest {
    pub raw: RawWithdrawalRequest,
    pub signature: Bytes,
}

impl WithdrawalRequest {
    fn decode(slice: &[u8]) -> Result<Self> {
        let fields = decode_table(slice, 2)?;
        let raw = RawWithdrawalRequest::from_slice(fields[0]).at("raw")?;
        let signature = decode_variable_bytes(fields[1]).at("signature")?;
        Ok(WithdrawalRequest {
            raw,
            signature: Bytes::copy_from_slice(signature),
        })
    }
}

impl Entity for WithdrawalRequest {
    const NAME: &'static str = "WithdrawalRequest";

    fn as_bytes(&self) -> Bytes {
        encode_table(&[
            &self.raw.as_bytes()[..],
            &encode_variable_bytes(&self.signature)[..],
        ])
        .into()
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::decode(slice).at("withdrawal_request")
    }
}

/// Withdrawal request carrying the full owner lock, the payload submitted
/// to `gw_submit_withdrawal_request`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalRequestExtra {
    pub request: WithdrawalRequest,
    pub owner_lock: Script,
}

impl WithdrawalRequestExtra {
    fn decode(slice: &[u8]) -> Result<Self> {
        let fields = decode_table(slice, 2)?;
        Ok(WithdrawalRequestExtra {
            request: WithdrawalRequest::decode(fields[0]).at("request")?,
            owner_lock: Script::from_slice(fields[1]).at("owner_lock")?,
        })
    }
}

impl Entity for WithdrawalRequestExtra {
    const NAME: &'static str = "WithdrawalRequestExtra";

    fn as_bytes(&self) -> Bytes {
        encode_table(&[
            &self.request.as_bytes()[..],
            &self.owner_lock.as_bytes()[..],
        ])
        .into()
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::decode(slice).at("withdrawal_request_extra")
    }
}

/// Progress of a submitted withdrawal request on Layer 2.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalStatus {
    /// In the mem pool, not yet in a block.
    Pending,
    /// Included in a Layer 2 block.
    Committed,
}

/// A withdrawal request as reported by `gw_get_withdrawal`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WithdrawalWithStatus {
    pub withdrawal: Option<WithdrawalRequestExtra>,
    pub status: WithdrawalStatus,
}
