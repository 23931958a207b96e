use std::path::Path;

use anyhow::{anyhow, Context, Result};
use ckb_fixed_hash::H256;
use gw_bridge_types::json::{JsonScript, JsonScriptHashType};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use gw_bridge_types::json::CellDep;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl NetworkType {
    pub fn from_prefix(value: &str) -> Option<NetworkType> {
        match value {
            "ckb" => Some(NetworkType::Mainnet),
            "ckt" => Some(NetworkType::Testnet),
            _ => None,
        }
    }

    pub fn to_prefix(self) -> &'static str {
        match self {
            NetworkType::Mainnet => "ckb",
            NetworkType::Testnet => "ckt",
        }
    }
}

/// Layer 1 address encoding of scripts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressFormat {
    /// ckb2021 full format, bech32m.
    Full,
    /// Pre-2021 full-data / full-type format, bech32.
    Deprecated,
}

impl Default for AddressFormat {
    fn default() -> Self {
        AddressFormat::Full
    }
}

/// Code of the Layer 1 lock that owns an Ethereum identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Layer1LockConfig {
    pub code_hash: H256,
    pub hash_type: JsonScriptHashType,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressTranslatorConfig {
    pub network: NetworkType,
    pub rollup_type_hash: H256,
    pub eth_account_lock_type_hash: H256,
    pub deposit_lock_type_hash: H256,
    #[serde(default)]
    pub layer1_lock: Option<Layer1LockConfig>,
    #[serde(default)]
    pub address_format: AddressFormat,
    /// Registry of deposits; unset keeps the legacy 3-field deposit args.
    #[serde(default)]
    pub deposit_registry_id: Option<u32>,
}

impl AddressTranslatorConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_toml(path)
    }
}

/// Withdrawal lock deployment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", rename_all = "snake_case", deny_unknown_fields)]
pub enum WithdrawalConfig {
    /// Finality lock with table args, referenced by script and cell dep.
    Legacy {
        script: JsonScript,
        cell_dep: CellDep,
    },
    /// Godwoken v1 withdrawal lock, referenced by type hash.
    V1 { script_type_hash: H256 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub address: AddressTranslatorConfig,
    pub withdrawal: WithdrawalConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_toml(path)
    }
}

fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&content).map_err(|err| anyhow!("parse config {}: {}", path.display(), err))
}
