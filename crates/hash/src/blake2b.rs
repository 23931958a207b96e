pub use blake2b_ref::{Blake2b, Blake2bBuilder};

pub const BLAKE2B_KEY: &[u8] = &[];
pub const BLAKE2B_LEN: usize = 32;
pub const CKB_PERSONALIZATION: &[u8] = b"ckb-default-hash";

pub fn new_blake2b() -> Blake2b {
    Blake2bBuilder::new(BLAKE2B_LEN)
        .personal(CKB_PERSONALIZATION)
        .build()
}

/// blake2b-256 with the CKB personalization, the hash behind script hashes.
pub fn hash(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = new_blake2b();
    hasher.update(bytes);

    let mut hash = [0u8; 32];
    hasher.finalize(&mut hash);
    hash
}

pub struct CkbHasher {
    hasher: Blake2b,
}

impl CkbHasher {
    pub fn new() -> Self {
        Self {
            hasher: new_blake2b(),
        }
    }

    pub fn update(mut self, data: &[u8]) -> Self {
        self.hasher.update(data);
        self
    }

    pub fn finalize(self) -> [u8; 32] {
        let mut hash = [0u8; 32];
        self.hasher.finalize(&mut hash);
        hash
    }
}

impl Default for CkbHasher {
    fn default() -> Self {
        Self::new()
    }
}
