use ckb_fixed_hash::H256;
use gw_bridge_address::AddressError;
use thiserror::Error;

use crate::capacity::HumanCapacity;

#[derive(Error, Debug)]
pub enum WithdrawalError {
    #[error("withdrawal requires {} CKB at least, provided {}", HumanCapacity(*.required), HumanCapacity(*.provided))]
    BelowMinimumCapacity { required: u64, provided: u64 },
    #[error("invalid amount {0:?}: {1}")]
    InvalidAmount(String, String),
    #[error("account of script hash {0} not found")]
    AccountNotFound(String),
    #[error("eth address {eth_address} owns account {expected:#x}, request is from {actual:#x}")]
    AccountMismatch {
        eth_address: String,
        expected: H256,
        actual: H256,
    },
    #[error("registry {0} is not supported")]
    UnsupportedRegistry(u32),
    #[error(transparent)]
    Address(#[from] AddressError),
    #[error(transparent)]
    Codec(#[from] gw_bridge_types::Error),
    #[error("rollup cell of {0:#x} not found")]
    RollupCellNotFound(H256),
    #[error("rpc: {0}")]
    Rpc(anyhow::Error),
    #[error("cell collector: {0}")]
    Collector(anyhow::Error),
    #[error("signer: {0}")]
    Signer(anyhow::Error),
}

pub type Result<T, E = WithdrawalError> = std::result::Result<T, E>;
