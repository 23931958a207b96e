//! JSON forms of the records, as exchanged with CKB and Godwoken RPC.
//!
//! Hashes are `0x` hex, integers are hex quantities and bytes are `0x` hex.

use std::convert::TryFrom;

use bytes::Bytes;
use ckb_fixed_hash::H256;
use ckb_jsonrpc_types::{JsonBytes, Uint128, Uint32, Uint64};
use serde::{Deserialize, Serialize};

use crate::core::{Script, ScriptHashType};
use crate::deposit::DepositLockArgs;
use crate::error::{Error, Result, ResultExt};
use crate::since::Since;
use crate::withdrawal::{
    RawWithdrawalRequest, WithdrawalRequest, WithdrawalRequestExtra, WithdrawalStatus,
    WithdrawalWithStatus,
};

pub use ckb_jsonrpc_types::{
    CellDep, Script as JsonScript, ScriptHashType as JsonScriptHashType,
};

impl TryFrom<JsonScriptHashType> for ScriptHashType {
    type Error = Error;

    fn try_from(json: JsonScriptHashType) -> Result<Self> {
        match json {
            JsonScriptHashType::Data => Ok(ScriptHashType::Data),
            JsonScriptHashType::Type => Ok(ScriptHashType::Type),
            JsonScriptHashType::Data1 => Err(Error::InvalidHashType {
                field: "value".to_string(),
                value: 2,
            }),
        }
    }
}

impl From<ScriptHashType> for JsonScriptHashType {
    fn from(hash_type: ScriptHashType) -> Self {
        match hash_type {
            ScriptHashType::Data => JsonScriptHashType::Data,
            ScriptHashType::Type => JsonScriptHashType::Type,
        }
    }
}

impl TryFrom<JsonScript> for Script {
    type Error = Error;

    fn try_from(json: JsonScript) -> Result<Self> {
        let JsonScript {
            code_hash,
            hash_type,
            args,
        } = json;
        Ok(Script {
            code_hash,
            hash_type: ScriptHashType::try_from(hash_type).at("hash_type")?,
            args: Bytes::copy_from_slice(args.as_bytes()),
        })
    }
}

impl From<Script> for JsonScript {
    fn from(script: Script) -> Self {
        JsonScript {
            code_hash: script.code_hash,
            hash_type: script.hash_type.into(),
            args: JsonBytes::from_vec(script.args.to_vec()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonDepositLockArgs {
    pub owner_lock_hash: H256,
    pub layer2_lock: JsonScript,
    pub cancel_timeout: Uint64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<Uint32>,
}

impl TryFrom<JsonDepositLockArgs> for DepositLockArgs {
    type Error = Error;

    fn try_from(json: JsonDepositLockArgs) -> Result<Self> {
        Ok(DepositLockArgs {
            owner_lock_hash: json.owner_lock_hash,
            layer2_lock: Script::try_from(json.layer2_lock).at("layer2_lock")?,
            cancel_timeout: Since::from_raw_value(json.cancel_timeout.value()),
            registry_id: json.registry_id.map(|id| id.value()),
        })
    }
}

impl From<DepositLockArgs> for JsonDepositLockArgs {
    fn from(args: DepositLockArgs) -> Self {
        JsonDepositLockArgs {
            owner_lock_hash: args.owner_lock_hash,
            layer2_lock: args.layer2_lock.into(),
            cancel_timeout: args.cancel_timeout.value().into(),
            registry_id: args.registry_id.map(Into::into),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonRawWithdrawalRequest {
    pub nonce: Uint32,
    pub chain_id: Uint64,
    pub capacity: Uint64,
    pub amount: Uint128,
    pub sudt_script_hash: H256,
    pub account_script_hash: H256,
    pub registry_id: Uint32,
    pub owner_lock_hash: H256,
    pub fee: Uint128,
}

impl From<JsonRawWithdrawalRequest> for RawWithdrawalRequest {
    fn from(json: JsonRawWithdrawalRequest) -> Self {
        RawWithdrawalRequest {
            nonce: json.nonce.value(),
            chain_id: json.chain_id.value(),
            capacity: json.capacity.value(),
            amount: json.amount.value(),
            sudt_script_hash: json.sudt_script_hash,
            account_script_hash: json.account_script_hash,
            registry_id: json.registry_id.value(),
            owner_lock_hash: json.owner_lock_hash,
            fee: json.fee.value(),
        }
    }
}

impl From<RawWithdrawalRequest> for JsonRawWithdrawalRequest {
    fn from(raw: RawWithdrawalRequest) -> Self {
        JsonRawWithdrawalRequest {
            nonce: raw.nonce.into(),
            chain_id: raw.chain_id.into(),
            capacity: raw.capacity.into(),
            amount: raw.amount.into(),
            sudt_script_hash: raw.sudt_script_hash,
            account_script_hash: raw.account_script_hash,
            registry_id: raw.registry_id.into(),
            owner_lock_hash: raw.owner_lock_hash,
            fee: raw.fee.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonWithdrawalRequest {
    pub raw: JsonRawWithdrawalRequest,
    pub signature: JsonBytes,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JsonWithdrawalRequestExtra {
    pub request: JsonWithdrawalRequest,
    pub owner_lock: JsonScript,
}

impl TryFrom<JsonWithdrawalRequestExtra> for WithdrawalRequestExtra {
    type Error = Error;

    fn try_from(json: JsonWithdrawalRequestExtra) -> Result<Self> {
        let request = WithdrawalRequest {
            raw: json.request.raw.into(),
            signature: Bytes::copy_from_slice(json.request.signature.as_bytes()),
        };
        Ok(WithdrawalRequestExtra {
            request,
            owner_lock: Script::try_from(json.owner_lock).at("owner_lock")?,
        })
    }
}

impl From<WithdrawalRequestExtra> for JsonWithdrawalRequestExtra {
    fn from(extra: WithdrawalRequestExtra) -> Self {
        let WithdrawalRequestExtra {
            request,
            owner_lock,
        } = extra;
        JsonWithdrawalRequestExtra {
            request: JsonWithdrawalRequest {
                raw: request.raw.into(),
                signature: JsonBytes::from_vec(request.signature.to_vec()),
            },
            owner_lock: owner_lock.into(),
        }
    }
}

/// Response of `gw_get_withdrawal`. Fields added by newer nodes are ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonWithdrawalWithStatus {
    #[serde(default)]
    pub withdrawal: Option<JsonWithdrawalRequestExtra>,
    pub status: WithdrawalStatus,
}

impl TryFrom<JsonWithdrawalWithStatus> for WithdrawalWithStatus {
    type Error = Error;

    fn try_from(json: JsonWithdrawalWithStatus) -> Result<Self> {
        let withdrawal = json
            .withdrawal
            .map(WithdrawalRequestExtra::try_from)
            .transpose()
            .at("withdrawal")?;
        Ok(WithdrawalWithStatus {
            withdrawal,
            status: json.status,
        })
    }
}
