//! Godwoken withdrawal requests: minimum capacity, raw request, EIP-712
//! signing message and submission.

mod builder;
mod capacity;
mod cells;
pub mod eip712;
mod error;
mod traits;
mod withdraw;

pub use builder::{CanWithdraw, WithdrawalParams, WithdrawalRequestBuilder};
pub use capacity::{
    chain_id, minimal_legacy_withdrawal_capacity, minimal_v1_withdrawal_capacity,
    v1_withdrawal_capacity, HumanCapacity, SUDT_DATA_SIZE,
};
pub use cells::{filter_withdrawal_cells, LiveCell, WithdrawalCell, WithdrawalCells};
pub use eip712::{EIP712Domain, EIP712Encode, TypedWithdrawal};
pub use error::{Result, WithdrawalError};
pub use traits::{CellCollector, GodwokenRpc, WithdrawalSigner};
pub use withdraw::{GodwokenWithdraw, WithdrawRequest};
