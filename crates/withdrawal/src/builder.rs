use std::str::FromStr;

use ckb_fixed_hash::H256;
use gw_bridge_address::{parse_eth_address, AddressCodec, AddressTranslator, CkbAddressCodec};
use gw_bridge_config::WithdrawalConfig;
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::Script;
use gw_bridge_types::withdrawal::{RawWithdrawalRequest, WithdrawalRequest, WithdrawalRequestExtra};

use crate::capacity::{
    minimal_legacy_withdrawal_capacity, minimal_v1_withdrawal_capacity, v1_withdrawal_capacity,
    HumanCapacity,
};
use crate::eip712::{EIP712Domain, TypedWithdrawal, Withdrawal, ETH_REGISTRY_ACCOUNT_ID};
use crate::error::{Result, WithdrawalError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanWithdraw {
    pub allowed: bool,
    /// Minimal capacity in shannons.
    pub minimum: u64,
}

#[derive(Debug, Clone)]
pub struct WithdrawalParams<'a> {
    pub eth_address: &'a str,
    /// CKB in shannons
    pub capacity: u64,
    /// SUDT amount
    pub amount: u128,
    pub owner_lock: &'a Script,
    pub fee: u128,
    pub nonce: u32,
    pub chain_id: u64,
    /// `None` or the zero hash withdraws CKB only.
    pub sudt_script_hash: Option<H256>,
}

impl<'a> WithdrawalParams<'a> {
    pub fn is_sudt(&self) -> bool {
        matches!(&self.sudt_script_hash, Some(hash) if hash != &H256::default())
    }
}

/// Builds raw withdrawal requests and their signing messages.
#[derive(Debug, Clone)]
pub struct WithdrawalRequestBuilder<C = CkbAddressCodec> {
    config: WithdrawalConfig,
    translator: AddressTranslator<C>,
}

impl<C: AddressCodec> WithdrawalRequestBuilder<C> {
    pub fn new(config: WithdrawalConfig, translator: AddressTranslator<C>) -> Self {
        WithdrawalRequestBuilder { config, translator }
    }

    pub fn config(&self) -> &WithdrawalConfig {
        &self.config
    }

    pub fn translator(&self) -> &AddressTranslator<C> {
        &self.translator
    }

    pub fn minimum_withdrawal_capacity(&self, is_sudt: bool) -> u64 {
        match self.config {
            WithdrawalConfig::V1 { .. } => minimal_v1_withdrawal_capacity(is_sudt),
            WithdrawalConfig::Legacy { .. } => minimal_legacy_withdrawal_capacity(is_sudt),
        }
    }

    /// Required capacity of a withdrawal to `owner_lock`.
    pub fn required_capacity(&self, owner_lock: &Script, is_sudt: bool) -> u64 {
        let minimum = self.minimum_withdrawal_capacity(is_sudt);
        match self.config {
            WithdrawalConfig::V1 { .. } => {
                std::cmp::max(minimum, v1_withdrawal_capacity(owner_lock, is_sudt))
            }
            WithdrawalConfig::Legacy { .. } => minimum,
        }
    }

    /// Check a CKB amount such as `"300"` or `"254.5"` against the CKB only minimum.
    pub fn can_withdraw(&self, amount: &str) -> Result<CanWithdraw> {
        let capacity = HumanCapacity::from_str(amount)
            .map_err(|err| WithdrawalError::InvalidAmount(amount.to_string(), err))?;
        let minimum = self.minimum_withdrawal_capacity(false);
        Ok(CanWithdraw {
            allowed: capacity.0 >= minimum,
            minimum,
        })
    }

    pub fn build_withdrawal_request(
        &self,
        params: &WithdrawalParams,
    ) -> Result<RawWithdrawalRequest> {
        let is_sudt = params.is_sudt();
        let required = self.required_capacity(params.owner_lock, is_sudt);
        if params.capacity < required {
            return Err(WithdrawalError::BelowMinimumCapacity {
                required,
                provided: params.capacity,
            });
        }

        let account_script_hash = self.translator.layer2_eth_lock_hash(params.eth_address)?;
        let owner_lock_hash = params.owner_lock.hash();
        log::debug!(
            "withdrawal of {:#} from account {:#x} to owner lock {:#x}",
            HumanCapacity(params.capacity),
            account_script_hash,
            owner_lock_hash
        );

        Ok(RawWithdrawalRequest {
            nonce: params.nonce,
            chain_id: params.chain_id,
            capacity: params.capacity,
            amount: params.amount,
            sudt_script_hash: params.sudt_script_hash.clone().unwrap_or_default(),
            account_script_hash,
            registry_id: ETH_REGISTRY_ACCOUNT_ID,
            owner_lock_hash,
            fee: params.fee,
        })
    }

    /// Typed data for `eth_address` to sign. The address must own the
    /// account of the request.
    pub fn build_signable_message(
        &self,
        raw: &RawWithdrawalRequest,
        owner_lock: &Script,
        eth_address: &str,
    ) -> Result<TypedWithdrawal> {
        let address = parse_eth_address(eth_address)?;
        let account_script_hash = self.translator.layer2_eth_lock_hash(eth_address)?;
        if account_script_hash != raw.account_script_hash {
            return Err(WithdrawalError::AccountMismatch {
                eth_address: eth_address.to_string(),
                expected: account_script_hash,
                actual: raw.account_script_hash.clone(),
            });
        }
        Ok(TypedWithdrawal {
            domain: EIP712Domain::godwoken(raw.chain_id),
            message: Withdrawal::from_raw(raw, owner_lock, &address)?,
        })
    }

    pub fn assemble_signed_request(
        &self,
        raw: RawWithdrawalRequest,
        signature: Bytes,
        owner_lock: Script,
    ) -> WithdrawalRequestExtra {
        WithdrawalRequestExtra {
            request: WithdrawalRequest { raw, signature },
            owner_lock,
        }
    }
}
