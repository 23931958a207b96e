//! Layer 1 address codec and the Ethereum address translator.

mod codec;
mod error;
mod eth;
mod translator;

pub use codec::{
    AddressCodec, AddressType, CkbAddressCodec, CodeHashIndex, ACP_TYPE_HASH_AGGRON,
    ACP_TYPE_HASH_LINA, MULTISIG_TYPE_HASH, SIGHASH_TYPE_HASH,
};
pub use error::{AddressError, Result};
pub use eth::{parse_eth_address, ETH_ADDRESS_LEN};
pub use translator::{AddressTranslator, OMNI_LOCK_DEFAULT_FLAGS, OMNI_LOCK_ETHEREUM_FLAG};
