use ckb_fixed_hash::H256;
use gw_bridge_address::AddressCodec;
use gw_bridge_config::WithdrawalConfig;
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::{CellOutput, Script, ScriptHashType};
use gw_bridge_types::global_state::GlobalState;
use gw_bridge_types::withdrawal::{parse_legacy_withdrawal_lock_args, parse_withdrawal_lock_args};

use crate::builder::WithdrawalRequestBuilder;
use crate::error::{Result, WithdrawalError};

/// Live cell returned by a cell collector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveCell {
    pub tx_hash: H256,
    pub index: u32,
    pub output: CellOutput,
    pub data: Bytes,
}

/// Withdrawal cell owned by a Layer 1 lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalCell {
    pub cell: LiveCell,
    pub account_script_hash: H256,
    pub withdrawal_block_number: u64,
}

struct WithdrawalLockInfo {
    rollup_type_hash: H256,
    owner_lock_hash: H256,
    account_script_hash: H256,
    withdrawal_block_number: u64,
}

fn parse_withdrawal_lock(
    config: &WithdrawalConfig,
    output: &CellOutput,
) -> Option<gw_bridge_types::Result<WithdrawalLockInfo>> {
    let lock = &output.lock;
    match config {
        WithdrawalConfig::V1 { script_type_hash } => {
            if &lock.code_hash != script_type_hash || lock.hash_type != ScriptHashType::Type {
                return None;
            }
            Some(parse_withdrawal_lock_args(&lock.args).map(|parsed| {
                WithdrawalLockInfo {
                    rollup_type_hash: parsed.rollup_type_hash,
                    owner_lock_hash: parsed.lock_args.owner_lock_hash,
                    account_script_hash: parsed.lock_args.account_script_hash,
                    withdrawal_block_number: parsed.lock_args.withdrawal_block_number,
                }
            }))
        }
        WithdrawalConfig::Legacy { script, .. } => {
            let hash_type = match ScriptHashType::try_from(script.hash_type.clone()) {
                Ok(hash_type) => hash_type,
                Err(err) => return Some(Err(err)),
            };
            if lock.code_hash != script.code_hash || lock.hash_type != hash_type {
                return None;
            }
            Some(
                parse_legacy_withdrawal_lock_args(&lock.args).map(|(rollup_type_hash, args)| {
                    WithdrawalLockInfo {
                        rollup_type_hash,
                        owner_lock_hash: args.owner_lock_hash,
                        account_script_hash: args.account_script_hash,
                        withdrawal_block_number: args.withdrawal_block_number,
                    }
                }),
            )
        }
    }
}

/// Keep withdrawal cells of `rollup_type_hash` owned by `owner_lock_hash`,
/// ordered by withdrawal block number.
pub fn filter_withdrawal_cells(
    config: &WithdrawalConfig,
    rollup_type_hash: &H256,
    cells: Vec<LiveCell>,
    owner_lock_hash: &H256,
) -> Vec<WithdrawalCell> {
    let mut withdrawals: Vec<_> = cells
        .into_iter()
        .filter_map(|cell| {
            let info = match parse_withdrawal_lock(config, &cell.output)? {
                Ok(info) => info,
                Err(err) => {
                    log::warn!(
                        "skip withdrawal cell {:#x}:{}, {}",
                        cell.tx_hash,
                        cell.index,
                        err
                    );
                    return None;
                }
            };
            if &info.rollup_type_hash != rollup_type_hash
                || &info.owner_lock_hash != owner_lock_hash
            {
                return None;
            }
            Some(WithdrawalCell {
                cell,
                account_script_hash: info.account_script_hash,
                withdrawal_block_number: info.withdrawal_block_number,
            })
        })
        .collect();
    withdrawals.sort_by_key(|w| w.withdrawal_block_number);
    withdrawals
}

/// Withdrawal cells split by the last finalized block of the rollup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalCells {
    /// Can be unlocked to the owner now.
    pub finalized: Vec<WithdrawalCell>,
    /// Still inside the challenge period.
    pub pending: Vec<WithdrawalCell>,
}

impl WithdrawalCells {
    pub fn split(withdrawals: Vec<WithdrawalCell>, global_state: &GlobalState) -> Self {
        let (finalized, pending) = withdrawals
            .into_iter()
            .partition(|w| global_state.is_finalized(w.withdrawal_block_number));
        WithdrawalCells { finalized, pending }
    }
}

impl<C: AddressCodec> WithdrawalRequestBuilder<C> {
    pub fn filter_withdrawal_cells(
        &self,
        cells: Vec<LiveCell>,
        owner_lock_hash: &H256,
    ) -> Vec<WithdrawalCell> {
        let rollup_type_hash = &self.translator().config().rollup_type_hash;
        filter_withdrawal_cells(self.config(), rollup_type_hash, cells, owner_lock_hash)
    }

    /// Own withdrawal cells, split by finality.
    pub fn collect_withdrawal_cells(
        &self,
        cells: Vec<LiveCell>,
        owner_lock_hash: &H256,
        global_state: &GlobalState,
    ) -> WithdrawalCells {
        WithdrawalCells::split(
            self.filter_withdrawal_cells(cells, owner_lock_hash),
            global_state,
        )
    }

    /// Indexer search key of withdrawal cells, the rollup type hash being
    /// the args prefix.
    pub fn withdrawal_lock_search_script(&self) -> Result<Script> {
        let rollup_type_hash = self.translator().config().rollup_type_hash.clone();
        let (code_hash, hash_type) = match self.config() {
            WithdrawalConfig::V1 { script_type_hash } => {
                (script_type_hash.clone(), ScriptHashType::Type)
            }
            WithdrawalConfig::Legacy { script, .. } => (
                script.code_hash.clone(),
                ScriptHashType::try_from(script.hash_type.clone())?,
            ),
        };
        Ok(Script::new(code_hash, hash_type, rollup_type_hash.as_bytes().to_vec()))
    }

    /// Global state in the data of the rollup cell.
    pub fn rollup_global_state(&self, rollup_cell: &LiveCell) -> Result<GlobalState> {
        let rollup_type_hash = &self.translator().config().rollup_type_hash;
        match &rollup_cell.output.type_ {
            Some(type_) if &type_.hash() == rollup_type_hash => {}
            _ => return Err(WithdrawalError::RollupCellNotFound(rollup_type_hash.clone())),
        }
        Ok(GlobalState::from_rollup_cell_data(&rollup_cell.data)?)
    }
}
