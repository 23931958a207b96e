use ckb_fixed_hash::{h256, H256};
use gw_bridge_address::AddressTranslator;
use gw_bridge_config::{AddressFormat, AddressTranslatorConfig, WithdrawalConfig};
use gw_bridge_withdrawal::WithdrawalRequestBuilder;

pub const ETH_ADDRESS_1: &str = "0x018332E7b64E01246BfC981C75f8f5A5B18115F0";
pub const ETH_ADDRESS_2: &str = "0xD173313A51f8fc37BcF67569b463abd89d81844f";
/// Private key of `ETH_ADDRESS_2`.
pub const PRIVKEY_2: &str = "d9066ff9f753a1898709b568119055660a77d9aae4d7a4ad677b8fb3d2a571e5";

pub const WITHDRAWAL_LOCK_TYPE_HASH: H256 =
    h256!("0x06ae0706bb2d7997d66224741d3ec7c173dbb2854a6d2cf97088796b677269c6");

pub fn testnet_translator() -> AddressTranslator {
    AddressTranslator::new(gw_bridge_config::testnet())
}

/// Testnet deployment before the deposit registry was introduced.
pub fn legacy_deposit_config() -> AddressTranslatorConfig {
    AddressTranslatorConfig {
        deposit_registry_id: None,
        ..gw_bridge_config::testnet()
    }
}

pub fn full_format_config() -> AddressTranslatorConfig {
    AddressTranslatorConfig {
        address_format: AddressFormat::Full,
        ..gw_bridge_config::testnet()
    }
}

pub fn testnet_withdrawal_builder() -> WithdrawalRequestBuilder {
    let config = WithdrawalConfig::V1 {
        script_type_hash: WITHDRAWAL_LOCK_TYPE_HASH,
    };
    WithdrawalRequestBuilder::new(config, testnet_translator())
}
