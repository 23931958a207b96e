use gw_bridge_config::NetworkType;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid eth address {0:?}, expected 0x followed by 40 hex chars")]
    InvalidEthAddress(String),
    #[error("{0} is not configured")]
    NotInitialized(&'static str),
    #[error("invalid ckb address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },
    #[error("address of {actual:?} network, expected {expected:?}")]
    NetworkMismatch {
        expected: NetworkType,
        actual: NetworkType,
    },
    #[error(transparent)]
    Codec(#[from] gw_bridge_types::Error),
}

impl AddressError {
    pub(crate) fn invalid_address(address: &str, reason: impl ToString) -> Self {
        AddressError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = AddressError> = std::result::Result<T, E>;
