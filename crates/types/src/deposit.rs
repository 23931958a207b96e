use bytes::Bytes;
use ckb_fixed_hash::H256;

use crate::core::{h256_from_slice, Script};
use crate::error::{Error, Result, ResultExt};
use crate::molecule::{decode_table, encode_table, table_field_count, StructReader};
use crate::prelude::Entity;
use crate::since::Since;

/// Args of a deposit cell lock, following the rollup type hash.
///
/// A `registry_id` selects the 4-field layout used since Godwoken v1, its
/// absence the legacy 3-field layout `[owner_lock_hash, layer2_lock, cancel_timeout]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositLockArgs {
    pub owner_lock_hash: H256,
    pub layer2_lock: Script,
    pub cancel_timeout: Since,
    pub registry_id: Option<u32>,
}

impl DepositLockArgs {
    /// On-chain lock args, `rollup_type_hash ++ table`.
    pub fn to_lock_args(&self, rollup_type_hash: &H256) -> Bytes {
        let mut args = rollup_type_hash.as_bytes().to_vec();
        args.extend_from_slice(&self.as_bytes());
        Bytes::from(args)
    }

    pub fn from_lock_args(args: &[u8]) -> Result<(H256, Self)> {
        if args.len() < 32 {
            return Err(Error::length_mismatch(32, args.len()).at("rollup_type_hash"));
        }
        let rollup_type_hash = h256_from_slice(&args[..32])?;
        Ok((rollup_type_hash, Self::from_slice(&args[32..])?))
    }

    fn decode(slice: &[u8]) -> Result<Self> {
        let field_count = table_field_count(slice)?;
        if field_count != 3 && field_count != 4 {
            return Err(Error::malformed(format!(
                "expected 3 or 4 fields, header declares {}",
                field_count
            )));
        }
        let fields = decode_table(slice, field_count)?;
        let owner_lock_hash = h256_from_slice(fields[0]).at("owner_lock_hash")?;
        let layer2_lock = Script::from_slice(fields[1]).at("layer2_lock")?;
        let cancel_timeout = Since::from_slice(fields[2]).at("cancel_timeout")?;
        let registry_id = match fields.get(3) {
            Some(field) => Some(
                StructReader::new(field, 4)
                    .and_then(|mut r| r.read_u32())
                    .at("registry_id")?,
            ),
            None => None,
        };
        Ok(DepositLockArgs {
            owner_lock_hash,
            layer2_lock,
            cancel_timeout,
            registry_id,
        })
    }
}

impl Entity for DepositLockArgs {
    const NAME: &'static str = "DepositLockArgs";

    fn as_bytes(&self) -> Bytes {
        let layer2_lock = self.layer2_lock.as_bytes();
        let cancel_timeout = self.cancel_timeout.to_le_bytes();
        let mut fields: Vec<&[u8]> = vec![
            self.owner_lock_hash.as_bytes(),
            &layer2_lock[..],
            &cancel_timeout[..],
        ];
        let registry_id = self.registry_id.map(u32::to_le_bytes);
        if let Some(registry_id) = registry_id.as_ref() {
            fields.push(&registry_id[..]);
        }
        encode_table(&fields).into()
    }

    fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::decode(slice).at("deposit_lock_args")
    }
}
