use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use gw_bridge_types::core::{CellOutput, Script, ScriptHashType, ONE_CKB};
use gw_bridge_types::prelude::{Entity, FixedSize, H256};
use gw_bridge_types::withdrawal::{
    build_withdrawal_lock_args, WithdrawalLockArgs, WithdrawalLockArgsV1,
};

/// Size of an SUDT amount in cell data.
pub const SUDT_DATA_SIZE: usize = 16;

/// Capacity in shannons, displayed and parsed as CKB.
#[derive(Default, Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct HumanCapacity(pub u64);

impl From<u64> for HumanCapacity {
    fn from(value: u64) -> HumanCapacity {
        HumanCapacity(value)
    }
}

impl From<HumanCapacity> for u64 {
    fn from(value: HumanCapacity) -> u64 {
        value.0
    }
}

impl Deref for HumanCapacity {
    type Target = u64;
    fn deref(&self) -> &u64 {
        &self.0
    }
}

impl FromStr for HumanCapacity {
    type Err = String;
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let input = input.trim();
        // u64 and u32 parsing would accept a leading `+`
        if !input.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(format!("invalid capacity: {}", input));
        }
        let parts = input.split('.').collect::<Vec<_>>();
        if parts.len() > 2 {
            return Err(format!("invalid capacity: {}", input));
        }
        let ckb = parts
            .first()
            .ok_or_else(|| "Missing input".to_owned())?
            .parse::<u64>()
            .map_err(|err| err.to_string())?;
        let mut capacity = ckb
            .checked_mul(ONE_CKB)
            .ok_or_else(|| format!("capacity overflow: {}", input))?;
        if let Some(shannon_str) = parts.get(1) {
            let shannon_str = shannon_str.trim();
            if shannon_str.len() > 8 {
                return Err(format!("decimal part too long: {}", shannon_str.len()));
            }
            let mut shannon = shannon_str.parse::<u32>().map_err(|err| err.to_string())?;
            for _ in 0..(8 - shannon_str.len()) {
                shannon *= 10;
            }
            capacity = capacity
                .checked_add(u64::from(shannon))
                .ok_or_else(|| format!("capacity overflow: {}", input))?;
        }
        Ok(capacity.into())
    }
}

impl fmt::Display for HumanCapacity {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let ckb_part = self.0 / ONE_CKB;
        let shannon_part = self.0 % ONE_CKB;
        let shannon_part_string = format!("{:0>8}", shannon_part);
        let mut base = 10;
        let mut suffix_zero = 7;
        for i in 0..8 {
            if shannon_part % base > 0 {
                suffix_zero = i;
                break;
            }
            base *= 10;
        }
        write!(
            f,
            "{}.{}",
            ckb_part,
            &shannon_part_string[..(8 - suffix_zero)]
        )?;
        if f.alternate() {
            write!(f, " (CKB)")?;
        }
        Ok(())
    }
}

/// Godwoken v1 chain id, `compatible_chain_id << 32 | creator_id`.
pub fn chain_id(compatible_chain_id: u32, creator_id: u32) -> u64 {
    ((compatible_chain_id as u64) << 32) | creator_id as u64
}

fn dummy_type_script(is_sudt: bool) -> Option<Script> {
    // sudt type script args is the owner lock hash of the issuer
    is_sudt.then(|| Script::new(H256::default(), ScriptHashType::Type, vec![0u8; 32]))
}

fn data_size(is_sudt: bool) -> usize {
    if is_sudt {
        SUDT_DATA_SIZE
    } else {
        0
    }
}

/// Capacity to hold a v1 withdrawal cell owned by `owner_lock`.
pub fn v1_withdrawal_capacity(owner_lock: &Script, is_sudt: bool) -> u64 {
    // fixed size, the specific value is not important.
    let dummy_hash = H256::default();
    let args = build_withdrawal_lock_args(&dummy_hash, &WithdrawalLockArgsV1::default(), owner_lock);
    debug_assert_eq!(
        args.len(),
        32 + WithdrawalLockArgsV1::SIZE + 4 + owner_lock.as_bytes().len()
    );
    let output = CellOutput {
        capacity: 0,
        lock: Script::new(dummy_hash, ScriptHashType::Type, args),
        type_: dummy_type_script(is_sudt),
    };
    output.occupied_capacity(data_size(is_sudt))
}

/// Minimal v1 withdrawal capacity, assuming an owner lock with 20 bytes of args.
pub fn minimal_v1_withdrawal_capacity(is_sudt: bool) -> u64 {
    let dummy_owner_lock = Script::new(H256::default(), ScriptHashType::Type, vec![0u8; 20]);
    v1_withdrawal_capacity(&dummy_owner_lock, is_sudt)
}

/// Minimal capacity of a withdrawal cell under the legacy table args.
pub fn minimal_legacy_withdrawal_capacity(is_sudt: bool) -> u64 {
    let dummy_hash = H256::default();
    let mut args = dummy_hash.as_bytes().to_vec();
    args.extend_from_slice(&WithdrawalLockArgs::default().as_bytes());
    let output = CellOutput {
        capacity: 0,
        lock: Script::new(dummy_hash, ScriptHashType::Type, args),
        type_: dummy_type_script(is_sudt),
    };
    output.occupied_capacity(data_size(is_sudt))
}
