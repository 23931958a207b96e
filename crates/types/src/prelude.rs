pub use crate::error::ResultExt;
pub use bytes::Bytes;
pub use ckb_fixed_hash::{H160, H256};

use crate::error::Result;

/// A record with a canonical molecule serialization.
pub trait Entity: Sized {
    const NAME: &'static str;

    fn as_bytes(&self) -> Bytes;

    fn from_slice(slice: &[u8]) -> Result<Self>;
}

/// Types whose serialization is a struct of fixed size.
pub trait FixedSize {
    const SIZE: usize;
}
