//! Records of the Godwoken bridge and their molecule serialization.

pub mod core;
pub mod deposit;
pub mod error;
pub mod global_state;
pub mod json;
pub mod molecule;
pub mod prelude;
pub mod since;
pub mod withdrawal;

pub use bytes;
pub use ckb_fixed_hash::{h160, h256, H160, H256};
pub use error::{Error, Result};
