use anyhow::Result;
use async_trait::async_trait;
use ckb_fixed_hash::H256;
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::Script;
use gw_bridge_types::json::JsonWithdrawalWithStatus;

use crate::cells::LiveCell;
use crate::eip712::TypedWithdrawal;

/// Godwoken node RPC used by a withdrawal.
#[async_trait]
pub trait GodwokenRpc {
    async fn get_chain_id(&self) -> Result<u64>;

    async fn get_account_id_by_script_hash(&self, script_hash: &H256) -> Result<Option<u32>>;

    async fn get_nonce(&self, account_id: u32) -> Result<u32>;

    /// Submit a serialized `WithdrawalRequestExtra`, returns the request hash.
    async fn submit_withdrawal_request(&self, request: Bytes) -> Result<H256>;

    /// `gw_get_withdrawal`, `None` if the node does not know the hash.
    async fn get_withdrawal(
        &self,
        withdrawal_hash: &H256,
    ) -> Result<Option<JsonWithdrawalWithStatus>>;
}

/// Layer 1 live cells, as served by a CKB indexer.
#[async_trait]
pub trait CellCollector {
    /// The cell whose type script hashes to `rollup_type_hash`.
    async fn get_rollup_cell(&self, rollup_type_hash: &H256) -> Result<Option<LiveCell>>;

    /// Cells locked by `lock.code_hash` and `lock.hash_type` whose args start
    /// with `lock.args`.
    async fn get_cells_by_lock_prefix(&self, lock: &Script) -> Result<Vec<LiveCell>>;
}

/// Signs EIP-712 withdrawal messages, returns a 65-byte `r | s | v` signature.
#[async_trait]
pub trait WithdrawalSigner {
    async fn sign_typed_data(&self, typed_data: &TypedWithdrawal) -> Result<Bytes>;
}
