//! Reader of the rollup cell data.
//!
//! Only the fields a Layer 1 client needs are kept. The account and block
//! merkle states are skipped.

use ckb_fixed_hash::H256;

use crate::error::{Error, Result, ResultExt};
use crate::molecule::StructReader;

const MERKLE_ROOT_SIZE: usize = 32;
const ACCOUNT_MERKLE_STATE_SIZE: usize = MERKLE_ROOT_SIZE + 4;
const BLOCK_MERKLE_STATE_SIZE: usize = MERKLE_ROOT_SIZE + 8;

/// `GlobalState` since the rollup upgrade, with `tip_block_timestamp` and `version`.
pub const GLOBAL_STATE_SIZE: usize =
    32 + ACCOUNT_MERKLE_STATE_SIZE + BLOCK_MERKLE_STATE_SIZE + 32 + 32 + 8 + 8 + 1 + 1;
/// `GlobalStateV0`.
pub const GLOBAL_STATE_V0_SIZE: usize =
    32 + ACCOUNT_MERKLE_STATE_SIZE + BLOCK_MERKLE_STATE_SIZE + 32 + 32 + 8 + 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Running = 0,
    Halting = 1,
}

impl TryFrom<u8> for Status {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Status::Running),
            1 => Ok(Status::Halting),
            _ => Err(Error::malformed(format!("unknown rollup status {}", value))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalState {
    pub rollup_config_hash: H256,
    pub reverted_block_root: H256,
    pub tip_block_hash: H256,
    /// Absent from a v0 state.
    pub tip_block_timestamp: Option<u64>,
    pub last_finalized_block_number: u64,
    pub status: Status,
    pub version: u8,
}

impl GlobalState {
    /// Decode rollup cell data, falling back to the v0 layout.
    pub fn from_rollup_cell_data(data: &[u8]) -> Result<Self> {
        let is_v0 = match data.len() {
            GLOBAL_STATE_SIZE => false,
            GLOBAL_STATE_V0_SIZE => true,
            len => return Err(Error::length_mismatch(GLOBAL_STATE_SIZE, len).at("global_state")),
        };
        let mut reader = StructReader::new(data, data.len())?;
        let rollup_config_hash = H256(reader.read_array()?);
        reader.read(ACCOUNT_MERKLE_STATE_SIZE)?;
        reader.read(BLOCK_MERKLE_STATE_SIZE)?;
        let reverted_block_root = H256(reader.read_array()?);
        let tip_block_hash = H256(reader.read_array()?);
        let tip_block_timestamp = if is_v0 {
            None
        } else {
            Some(reader.read_u64()?)
        };
        let last_finalized_block_number = reader.read_u64()?;
        let [status] = reader.read_array::<1>()?;
        let status = Status::try_from(status).at("global_state.status")?;
        let version = if is_v0 {
            0
        } else {
            reader.read_array::<1>()?[0]
        };
        Ok(GlobalState {
            rollup_config_hash,
            reverted_block_root,
            tip_block_hash,
            tip_block_timestamp,
            last_finalized_block_number,
            status,
            version,
        })
    }

    /// A withdrawal of `withdrawal_block_number` can be unlocked.
    pub fn is_finalized(&self, withdrawal_block_number: u64) -> bool {
        withdrawal_block_number <= self.last_finalized_block_number
    }
}
