pub mod blake2b;
pub mod keccak;

pub use blake2b::{hash, CkbHasher};
pub use keccak::{keccak256, EthHasher};
