//! EIP-712 typed data of a Godwoken withdrawal.

use ckb_fixed_hash::H160;
use ethabi::Token;
use gw_bridge_hash::keccak256;
use gw_bridge_types::core::{Script as CkbScript, ScriptHashType};
use gw_bridge_types::withdrawal::RawWithdrawalRequest;
use serde_json::{json, Value};

use crate::error::{Result, WithdrawalError};

pub const ETH_REGISTRY_ACCOUNT_ID: u32 = 2;
pub const DOMAIN_NAME: &str = "Godwoken";
pub const DOMAIN_VERSION: &str = "1";

pub trait EIP712Encode {
    fn type_name() -> String;
    fn encode_type(&self, buf: &mut Vec<u8>);
    fn encode_data(&self, buf: &mut Vec<u8>);

    fn hash_struct(&self) -> [u8; 32] {
        let type_hash = {
            let mut buf = Vec::default();
            self.encode_type(&mut buf);
            keccak256(&buf)
        };
        let mut buf = type_hash.to_vec();
        self.encode_data(&mut buf);
        keccak256(&buf)
    }

    fn eip712_message(&self, domain_separator: [u8; 32]) -> [u8; 32] {
        let mut buf = b"\x19\x01".to_vec();
        buf.extend_from_slice(&domain_separator);
        buf.extend_from_slice(&self.hash_struct());
        keccak256(&buf)
    }
}

fn encode_uint(buf: &mut Vec<u8>, value: impl Into<ethabi::Uint>) {
    buf.extend(ethabi::encode(&[Token::Uint(value.into())]));
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    code_hash: [u8; 32],
    hash_type: String,
    args: Vec<u8>,
}

impl From<&CkbScript> for Script {
    fn from(script: &CkbScript) -> Self {
        let hash_type = match script.hash_type {
            ScriptHashType::Data => "data",
            ScriptHashType::Type => "type",
        };
        Script {
            code_hash: script.code_hash.0,
            hash_type: hash_type.to_string(),
            args: script.args.to_vec(),
        }
    }
}

impl EIP712Encode for Script {
    fn type_name() -> String {
        "Script".to_string()
    }

    fn encode_type(&self, buf: &mut Vec<u8>) {
        buf.extend(b"Script(bytes32 codeHash,string hashType,bytes args)");
    }

    fn encode_data(&self, buf: &mut Vec<u8>) {
        encode_uint(buf, self.code_hash);
        encode_uint(buf, keccak256(self.hash_type.as_bytes()));
        encode_uint(buf, keccak256(&self.args));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalAsset {
    // CKB amount
    ckb_capacity: u64,
    // SUDT amount
    udt_amount: u128,
    udt_script_hash: [u8; 32],
}

impl EIP712Encode for WithdrawalAsset {
    fn type_name() -> String {
        "WithdrawalAsset".to_string()
    }

    fn encode_type(&self, buf: &mut Vec<u8>) {
        buf.extend(b"WithdrawalAsset(uint256 ckbCapacity,uint256 UDTAmount,bytes32 UDTScriptHash)");
    }

    fn encode_data(&self, buf: &mut Vec<u8>) {
        encode_uint(buf, self.ckb_capacity);
        encode_uint(buf, self.udt_amount);
        encode_uint(buf, self.udt_script_hash);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressRegistry {
    Eth,
}

impl AddressRegistry {
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressRegistry::Eth => "ETH",
        }
    }

    pub fn from_registry_id(registry_id: u32) -> Result<Self> {
        match registry_id {
            ETH_REGISTRY_ACCOUNT_ID => Ok(AddressRegistry::Eth),
            _ => Err(WithdrawalError::UnsupportedRegistry(registry_id)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryAddress {
    registry: AddressRegistry,
    address: [u8; 20],
}

impl EIP712Encode for RegistryAddress {
    fn type_name() -> String {
        "RegistryAddress".to_string()
    }

    fn encode_type(&self, buf: &mut Vec<u8>) {
        buf.extend(b"RegistryAddress(string registry,address address)");
    }

    fn encode_data(&self, buf: &mut Vec<u8>) {
        encode_uint(buf, keccak256(self.registry.as_str().as_bytes()));
        buf.extend(ethabi::encode(&[Token::Address(self.address.into())]));
    }
}

/// Signed form of a RawWithdrawalRequest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    address: RegistryAddress,
    nonce: u32,
    chain_id: u64,
    // withdrawal fee, paid to block producer
    fee: u128,
    // layer1 lock to withdraw after challenge period
    layer1_owner_lock: Script,
    withdraw: WithdrawalAsset,
}

impl EIP712Encode for Withdrawal {
    fn type_name() -> String {
        "Withdrawal".to_string()
    }

    fn encode_type(&self, buf: &mut Vec<u8>) {
        buf.extend(b"Withdrawal(RegistryAddress address,uint256 nonce,uint256 chainId,uint256 fee,Script layer1OwnerLock,WithdrawalAsset withdraw)");
        self.address.encode_type(buf);
        self.layer1_owner_lock.encode_type(buf);
        self.withdraw.encode_type(buf);
    }

    fn encode_data(&self, buf: &mut Vec<u8>) {
        encode_uint(buf, self.address.hash_struct());
        encode_uint(buf, self.nonce);
        encode_uint(buf, self.chain_id);
        encode_uint(buf, self.fee);
        encode_uint(buf, self.layer1_owner_lock.hash_struct());
        encode_uint(buf, self.withdraw.hash_struct());
    }
}

impl Withdrawal {
    pub fn from_raw(
        raw: &RawWithdrawalRequest,
        owner_lock: &CkbScript,
        eth_address: &H160,
    ) -> Result<Self> {
        let registry = AddressRegistry::from_registry_id(raw.registry_id)?;
        Ok(Withdrawal {
            address: RegistryAddress {
                registry,
                address: eth_address.0,
            },
            nonce: raw.nonce,
            chain_id: raw.chain_id,
            fee: raw.fee,
            layer1_owner_lock: owner_lock.into(),
            withdraw: WithdrawalAsset {
                ckb_capacity: raw.capacity,
                udt_amount: raw.amount,
                udt_script_hash: raw.sudt_script_hash.0,
            },
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EIP712Domain {
    pub name: String,
    pub version: String,
    pub chain_id: u64,
}

impl EIP712Domain {
    pub fn godwoken(chain_id: u64) -> Self {
        EIP712Domain {
            name: DOMAIN_NAME.to_string(),
            version: DOMAIN_VERSION.to_string(),
            chain_id,
        }
    }
}

impl EIP712Encode for EIP712Domain {
    fn type_name() -> String {
        "EIP712Domain".to_string()
    }

    fn encode_type(&self, buf: &mut Vec<u8>) {
        buf.extend(b"EIP712Domain(string name,string version,uint256 chainId)");
    }

    fn encode_data(&self, buf: &mut Vec<u8>) {
        encode_uint(buf, keccak256(self.name.as_bytes()));
        encode_uint(buf, keccak256(self.version.as_bytes()));
        encode_uint(buf, self.chain_id);
    }
}

fn hex_str(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Withdrawal typed data handed to a signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypedWithdrawal {
    pub domain: EIP712Domain,
    pub message: Withdrawal,
}

impl TypedWithdrawal {
    /// The digest a signer signs.
    pub fn signing_message(&self) -> [u8; 32] {
        self.message.eip712_message(self.domain.hash_struct())
    }

    /// Payload of `eth_signTypedData_v4`. Chain ids and amounts may be wider
    /// than a JS number and are rendered as decimal strings.
    pub fn to_json(&self) -> Value {
        let message = &self.message;
        json!({
            "types": {
                "EIP712Domain": [
                    {"name": "name", "type": "string"},
                    {"name": "version", "type": "string"},
                    {"name": "chainId", "type": "uint256"},
                ],
                "RegistryAddress": [
                    {"name": "registry", "type": "string"},
                    {"name": "address", "type": "address"},
                ],
                "Script": [
                    {"name": "codeHash", "type": "bytes32"},
                    {"name": "hashType", "type": "string"},
                    {"name": "args", "type": "bytes"},
                ],
                "WithdrawalAsset": [
                    {"name": "ckbCapacity", "type": "uint256"},
                    {"name": "UDTAmount", "type": "uint256"},
                    {"name": "UDTScriptHash", "type": "bytes32"},
                ],
                "Withdrawal": [
                    {"name": "address", "type": "RegistryAddress"},
                    {"name": "nonce", "type": "uint256"},
                    {"name": "chainId", "type": "uint256"},
                    {"name": "fee", "type": "uint256"},
                    {"name": "layer1OwnerLock", "type": "Script"},
                    {"name": "withdraw", "type": "WithdrawalAsset"},
                ],
            },
            "primaryType": Withdrawal::type_name(),
            "domain": {
                "name": self.domain.name,
                "version": self.domain.version,
                "chainId": self.domain.chain_id.to_string(),
            },
            "message": {
                "address": {
                    "registry": message.address.registry.as_str(),
                    "address": hex_str(&message.address.address),
                },
                "nonce": message.nonce,
                "chainId": message.chain_id.to_string(),
                "fee": message.fee.to_string(),
                "layer1OwnerLock": {
                    "codeHash": hex_str(&message.layer1_owner_lock.code_hash),
                    "hashType": message.layer1_owner_lock.hash_type,
                    "args": hex_str(&message.layer1_owner_lock.args),
                },
                "withdraw": {
                    "ckbCapacity": message.withdraw.ckb_capacity.to_string(),
                    "UDTAmount": message.withdraw.udt_amount.to_string(),
                    "UDTScriptHash": hex_str(&message.withdraw.udt_script_hash),
                },
            },
        })
    }
}
