use crate::error::{Error, Result};

const RELATIVE_FLAG: u64 = 1 << 63;
const TIMESTAMP_METRIC: u64 = 0x4000_0000_0000_0000;

pub const SINCE_SIZE: usize = 8;

/// Two days, relative, timestamp metric: `0xc00000000002a300`.
pub const DEFAULT_DEPOSIT_CANCEL_TIMEOUT: Since = Since(0xc000_0000_0002_a300);

/// CKB `since` value of a deposit cancel timeout. The table codec treats it
/// as an opaque 8-byte quantity.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Since(u64);

impl Since {
    pub fn relative_timestamp(seconds: u64) -> Since {
        Since(RELATIVE_FLAG | TIMESTAMP_METRIC | seconds)
    }

    pub const fn from_raw_value(value: u64) -> Since {
        Since(value)
    }

    /// Accepts a pre-serialized little-endian since.
    pub fn from_slice(slice: &[u8]) -> Result<Since> {
        let mut buf = [0u8; SINCE_SIZE];
        if slice.len() != SINCE_SIZE {
            return Err(Error::length_mismatch(SINCE_SIZE, slice.len()));
        }
        buf.copy_from_slice(slice);
        Ok(Since(u64::from_le_bytes(buf)))
    }

    pub fn value(self) -> u64 {
        self.0
    }

    pub fn to_le_bytes(self) -> [u8; SINCE_SIZE] {
        self.0.to_le_bytes()
    }

    pub fn is_relative(self) -> bool {
        self.0 & RELATIVE_FLAG != 0
    }
}

impl Default for Since {
    fn default() -> Self {
        DEFAULT_DEPOSIT_CANCEL_TIMEOUT
    }
}

impl From<u64> for Since {
    fn from(value: u64) -> Self {
        Since(value)
    }
}

impl From<Since> for u64 {
    fn from(since: Since) -> Self {
        since.0
    }
}
