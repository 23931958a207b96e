use std::convert::TryFrom;

use ckb_fixed_hash::H256;
use gw_bridge_address::{AddressCodec, CkbAddressCodec};
use gw_bridge_types::core::Script;
use gw_bridge_types::global_state::GlobalState;
use gw_bridge_types::prelude::Entity;
use gw_bridge_types::withdrawal::WithdrawalWithStatus;

use crate::builder::{WithdrawalParams, WithdrawalRequestBuilder};
use crate::capacity::HumanCapacity;
use crate::cells::WithdrawalCells;
use crate::error::{Result, WithdrawalError};
use crate::traits::{CellCollector, GodwokenRpc, WithdrawalSigner};

/// A withdrawal from the Layer 2 account of `eth_address`.
#[derive(Debug, Clone)]
pub struct WithdrawRequest {
    pub eth_address: String,
    pub capacity: u64,
    pub amount: u128,
    pub owner_lock: Script,
    pub fee: u128,
    pub sudt_script_hash: Option<H256>,
}

pub struct GodwokenWithdraw<R, S, C = CkbAddressCodec> {
    builder: WithdrawalRequestBuilder<C>,
    rpc: R,
    signer: S,
}

impl<R, S, C> GodwokenWithdraw<R, S, C>
where
    R: GodwokenRpc + Send + Sync,
    S: WithdrawalSigner + Send + Sync,
    C: AddressCodec + Send + Sync,
{
    pub fn new(builder: WithdrawalRequestBuilder<C>, rpc: R, signer: S) -> Self {
        GodwokenWithdraw {
            builder,
            rpc,
            signer,
        }
    }

    pub fn builder(&self) -> &WithdrawalRequestBuilder<C> {
        &self.builder
    }

    /// Sign and submit a withdrawal, returns the withdrawal request hash.
    pub async fn withdraw(&self, request: &WithdrawRequest) -> Result<H256> {
        let mut params = WithdrawalParams {
            eth_address: &request.eth_address,
            capacity: request.capacity,
            amount: request.amount,
            owner_lock: &request.owner_lock,
            fee: request.fee,
            nonce: 0,
            chain_id: 0,
            sudt_script_hash: request.sudt_script_hash.clone(),
        };
        let required = self
            .builder
            .required_capacity(&request.owner_lock, params.is_sudt());
        if request.capacity < required {
            return Err(WithdrawalError::BelowMinimumCapacity {
                required,
                provided: request.capacity,
            });
        }

        let account_script_hash = self
            .builder
            .translator()
            .layer2_eth_lock_hash(&request.eth_address)?;
        let account_id = self
            .rpc
            .get_account_id_by_script_hash(&account_script_hash)
            .await
            .map_err(WithdrawalError::Rpc)?
            .ok_or_else(|| WithdrawalError::AccountNotFound(format!("{:#x}", account_script_hash)))?;
        params.nonce = self
            .rpc
            .get_nonce(account_id)
            .await
            .map_err(WithdrawalError::Rpc)?;
        params.chain_id = self.rpc.get_chain_id().await.map_err(WithdrawalError::Rpc)?;

        let raw = self.builder.build_withdrawal_request(&params)?;
        let typed_data =
            self.builder
                .build_signable_message(&raw, &request.owner_lock, &request.eth_address)?;
        let signature = self
            .signer
            .sign_typed_data(&typed_data)
            .await
            .map_err(WithdrawalError::Signer)?;
        let extra =
            self.builder
                .assemble_signed_request(raw, signature, request.owner_lock.clone());

        log::info!(
            "submit withdrawal of {:#} from account {} nonce {}",
            HumanCapacity(request.capacity),
            account_id,
            params.nonce
        );
        let hash = self
            .rpc
            .submit_withdrawal_request(extra.as_bytes())
            .await
            .map_err(WithdrawalError::Rpc)?;
        log::info!("withdrawal request {:#x} submitted", hash);
        Ok(hash)
    }

    /// A submitted withdrawal request and its status, `None` if unknown.
    pub async fn get_withdrawal(
        &self,
        withdrawal_hash: &H256,
    ) -> Result<Option<WithdrawalWithStatus>> {
        let withdrawal = self
            .rpc
            .get_withdrawal(withdrawal_hash)
            .await
            .map_err(WithdrawalError::Rpc)?;
        match withdrawal {
            Some(json) => Ok(Some(WithdrawalWithStatus::try_from(json)?)),
            None => Ok(None),
        }
    }

    pub async fn get_rollup_global_state<L>(&self, collector: &L) -> Result<GlobalState>
    where
        L: CellCollector + Sync,
    {
        let rollup_type_hash = &self.builder.translator().config().rollup_type_hash;
        let rollup_cell = collector
            .get_rollup_cell(rollup_type_hash)
            .await
            .map_err(WithdrawalError::Collector)?
            .ok_or_else(|| WithdrawalError::RollupCellNotFound(rollup_type_hash.clone()))?;
        self.builder.rollup_global_state(&rollup_cell)
    }

    /// Withdrawal cells owned by the Layer 1 lock of `eth_address`, split into
    /// finalized and pending ones.
    pub async fn fetch_withdrawal_cells<L>(
        &self,
        collector: &L,
        eth_address: &str,
    ) -> Result<WithdrawalCells>
    where
        L: CellCollector + Sync,
    {
        let owner_lock_hash = self
            .builder
            .translator()
            .eth_address_to_layer1_lock(eth_address)?
            .hash();
        let global_state = self.get_rollup_global_state(collector).await?;
        let search_script = self.builder.withdrawal_lock_search_script()?;
        let cells = collector
            .get_cells_by_lock_prefix(&search_script)
            .await
            .map_err(WithdrawalError::Collector)?;
        let withdrawals =
            self.builder
                .collect_withdrawal_cells(cells, &owner_lock_hash, &global_state);
        log::debug!(
            "{} finalized and {} pending withdrawals of {}, last finalized block {}",
            withdrawals.finalized.len(),
            withdrawals.pending.len(),
            eth_address,
            global_state.last_finalized_block_number
        );
        Ok(withdrawals)
    }
}
