use std::convert::TryFrom;

use ckb_fixed_hash::{H160, H256};
use gw_bridge_config::AddressTranslatorConfig;
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::{parse_hex, parse_hex_fixed, Script, ScriptHashType};
use gw_bridge_types::deposit::DepositLockArgs;
use gw_bridge_types::error::ResultExt;
use gw_bridge_types::since::Since;

use crate::codec::{AddressCodec, CkbAddressCodec};
use crate::error::{AddressError, Result};
use crate::eth::parse_eth_address;

/// Omni-lock auth flag of an ethereum address.
pub const OMNI_LOCK_ETHEREUM_FLAG: u8 = 0x01;
/// Omni-lock args flags, no extra mode enabled.
pub const OMNI_LOCK_DEFAULT_FLAGS: u8 = 0x00;

/// Derives Layer 1 and Layer 2 identities of an Ethereum address.
#[derive(Debug, Clone)]
pub struct AddressTranslator<C = CkbAddressCodec> {
    config: AddressTranslatorConfig,
    codec: C,
}

impl AddressTranslator<CkbAddressCodec> {
    pub fn new(config: AddressTranslatorConfig) -> Self {
        let codec = CkbAddressCodec::new(config.address_format);
        AddressTranslator { config, codec }
    }
}

impl<C: AddressCodec> AddressTranslator<C> {
    pub fn with_codec(config: AddressTranslatorConfig, codec: C) -> Self {
        AddressTranslator { config, codec }
    }

    pub fn config(&self) -> &AddressTranslatorConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Omni-lock with `args = 0x01 | eth address | 0x00`.
    pub fn eth_address_to_layer1_lock(&self, eth_address: &str) -> Result<Script> {
        let address = parse_eth_address(eth_address)?;
        let layer1_lock = self
            .config
            .layer1_lock
            .as_ref()
            .ok_or(AddressError::NotInitialized("layer1_lock"))?;
        let hash_type = ScriptHashType::try_from(layer1_lock.hash_type.clone())
            .at("layer1_lock.hash_type")?;

        let mut args = Vec::with_capacity(22);
        args.push(OMNI_LOCK_ETHEREUM_FLAG);
        args.extend_from_slice(address.as_bytes());
        args.push(OMNI_LOCK_DEFAULT_FLAGS);
        Ok(Script::new(layer1_lock.code_hash.clone(), hash_type, args))
    }

    pub fn eth_address_to_layer1_address(&self, eth_address: &str) -> Result<String> {
        let lock = self.eth_address_to_layer1_lock(eth_address)?;
        let address = self.codec.encode(&lock, self.config.network)?;
        log::debug!("layer1 address of {}: {}", eth_address, address);
        Ok(address)
    }

    pub fn eth_address_to_ckb_address(&self, eth_address: &str) -> Result<String> {
        self.eth_address_to_layer1_address(eth_address)
    }

    /// Layer 2 account lock, `args = rollup_type_hash | eth address`.
    pub fn layer2_eth_lock(&self, eth_address: &str) -> Result<Script> {
        let address = parse_eth_address(eth_address)?;
        Ok(self.layer2_lock_of(address.as_bytes()))
    }

    pub fn layer2_eth_lock_hash(&self, eth_address: &str) -> Result<H256> {
        let hash = self.layer2_eth_lock(eth_address)?.hash();
        log::debug!("layer2 lock hash of {}: {:#x}", eth_address, hash);
        Ok(hash)
    }

    pub fn eth_address_to_godwoken_short_address(&self, eth_address: &str) -> Result<H160> {
        let hash = self.layer2_eth_lock_hash(eth_address)?;
        let mut short_address = [0u8; 20];
        short_address.copy_from_slice(&hash.as_bytes()[..20]);
        Ok(H160(short_address))
    }

    fn layer2_lock_of(&self, eth_lock_args: &[u8]) -> Script {
        let mut args = self.config.rollup_type_hash.as_bytes().to_vec();
        args.extend_from_slice(eth_lock_args);
        Script::new(
            self.config.eth_account_lock_type_hash.clone(),
            ScriptHashType::Type,
            Bytes::from(args),
        )
    }

    /// Deposit lock args, carrying the registry id when one is configured.
    pub fn deposit_lock_args(
        &self,
        owner_lock_hash: &H256,
        eth_lock_args: &[u8],
        cancel_timeout: Option<Since>,
    ) -> DepositLockArgs {
        DepositLockArgs {
            owner_lock_hash: owner_lock_hash.clone(),
            layer2_lock: self.layer2_lock_of(eth_lock_args),
            cancel_timeout: cancel_timeout.unwrap_or_default(),
            registry_id: self.config.deposit_registry_id,
        }
    }

    pub fn deposit_lock(&self, deposit_lock_args: &DepositLockArgs) -> Script {
        Script::new(
            self.config.deposit_lock_type_hash.clone(),
            ScriptHashType::Type,
            deposit_lock_args.to_lock_args(&self.config.rollup_type_hash),
        )
    }

    /// `owner_lock_hash` is `0x` + 64 hex chars, `eth_lock_args` `0x` hex.
    pub fn get_layer2_deposit_address_by_owner_lock(
        &self,
        owner_lock_hash: &str,
        eth_lock_args: &str,
        cancel_timeout: Option<Since>,
    ) -> Result<String> {
        let owner_lock_hash = parse_hex_fixed(owner_lock_hash, 32).at("owner_lock_hash")?;
        let eth_lock_args = parse_hex(eth_lock_args).at("eth_lock_args")?;
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&owner_lock_hash);
        self.deposit_address(&H256(hash), &eth_lock_args, cancel_timeout)
    }

    fn deposit_address(
        &self,
        owner_lock_hash: &H256,
        eth_lock_args: &[u8],
        cancel_timeout: Option<Since>,
    ) -> Result<String> {
        let args = self.deposit_lock_args(owner_lock_hash, eth_lock_args, cancel_timeout);
        let lock = self.deposit_lock(&args);
        let address = self.codec.encode(&lock, self.config.network)?;
        log::debug!(
            "deposit address of owner {:#x}: {}",
            owner_lock_hash,
            address
        );
        Ok(address)
    }

    /// Deposit address owned by the omni-lock of `eth_address`.
    pub fn get_layer2_deposit_address(&self, eth_address: &str) -> Result<String> {
        self.get_layer2_deposit_address_with_timeout(eth_address, None)
    }

    pub fn get_layer2_deposit_address_with_timeout(
        &self,
        eth_address: &str,
        cancel_timeout: Option<Since>,
    ) -> Result<String> {
        let address = parse_eth_address(eth_address)?;
        let owner_lock_hash = self.eth_address_to_layer1_lock(eth_address)?.hash();
        self.deposit_address(&owner_lock_hash, address.as_bytes(), cancel_timeout)
    }

    /// Deposit address owned by an arbitrary Layer 1 address.
    pub fn get_default_lock_layer2_deposit_address(
        &self,
        ckb_address: &str,
        eth_address: &str,
    ) -> Result<String> {
        let address = parse_eth_address(eth_address)?;
        let owner_lock_hash = self.ckb_address_to_lock_script_hash(ckb_address)?;
        self.deposit_address(&owner_lock_hash, address.as_bytes(), None)
    }

    pub fn ckb_address_to_lock_script(&self, ckb_address: &str) -> Result<Script> {
        let (network, script) = self.codec.decode(ckb_address)?;
        if network != self.config.network {
            return Err(AddressError::NetworkMismatch {
                expected: self.config.network,
                actual: network,
            });
        }
        Ok(script)
    }

    pub fn ckb_address_to_lock_script_hash(&self, ckb_address: &str) -> Result<H256> {
        Ok(self.ckb_address_to_lock_script(ckb_address)?.hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gw_bridge_config::{AddressFormat, NetworkType};
    use gw_bridge_types::h256;
    use gw_bridge_types::molecule::table_field_count;
    use gw_bridge_types::prelude::Entity;

    const A1: &str = "0x018332E7b64E01246BfC981C75f8f5A5B18115F0";

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn translator() -> AddressTranslator {
        init_log();
        AddressTranslator::new(gw_bridge_config::testnet())
    }

    #[test]
    fn test_layer1_lock() {
        let lock = translator().eth_address_to_layer1_lock(A1).unwrap();
        assert_eq!(
            hex::encode(&lock.args),
            "01018332e7b64e01246bfc981c75f8f5a5b18115f000"
        );
        assert_eq!(lock.hash_type, ScriptHashType::Type);
        assert_eq!(
            lock.hash(),
            h256!("0x3a4584466f046ec2f41dc757312f54cc6c5283998b80a216cc76c61b702d9bc9")
        );
    }

    #[test]
    fn test_short_address_is_hash_prefix() {
        let translator = translator();
        let hash = translator.layer2_eth_lock_hash(A1).unwrap();
        assert_eq!(
            hash,
            h256!("0x19f5ff51a85eed3b40f2cda333e10d716c9054204e0ef0a49dfd6ac2c37e07a6")
        );
        let short_address = translator.eth_address_to_godwoken_short_address(A1).unwrap();
        assert_eq!(short_address.as_bytes(), &hash.as_bytes()[..20]);
        // input case does not matter
        assert_eq!(
            translator
                .eth_address_to_godwoken_short_address(&A1.to_lowercase())
                .unwrap(),
            short_address
        );
    }

    #[test]
    fn test_invalid_eth_address() {
        let translator = translator();
        let input = "0x018332E7b64E01246BfC981C75f8f5A5B18115F";
        let expected = AddressError::InvalidEthAddress(input.to_string());
        assert_eq!(
            translator.eth_address_to_godwoken_short_address(input),
            Err(expected.clone())
        );
        assert_eq!(translator.eth_address_to_layer1_lock(input), Err(expected.clone()));
        assert_eq!(translator.get_layer2_deposit_address(input), Err(expected));
    }

    #[test]
    fn test_not_initialized() {
        let mut config = gw_bridge_config::testnet();
        config.layer1_lock = None;
        let translator = AddressTranslator::new(config);
        assert_eq!(
            translator.get_layer2_deposit_address(A1),
            Err(AddressError::NotInitialized("layer1_lock"))
        );
        // layer2 derivations do not need the layer1 lock
        assert!(translator.layer2_eth_lock_hash(A1).is_ok());
    }

    #[test]
    fn test_deposit_lock_args_layout() {
        let translator = translator();
        let owner_lock_hash = H256([0xaa; 32]);
        let args = translator.deposit_lock_args(&owner_lock_hash, &[0xbb; 20], None);
        assert_eq!(args.registry_id, Some(2));
        assert_eq!(args.cancel_timeout, Since::default());
        assert_eq!(table_field_count(&args.as_bytes()).unwrap(), 4);

        let lock = translator.deposit_lock(&args);
        assert_eq!(&lock.args[..32], translator.config().rollup_type_hash.as_bytes());
        assert_eq!(
            DepositLockArgs::from_slice(&lock.args[32..]).unwrap(),
            args
        );
    }

    #[test]
    fn test_deposit_by_owner_lock_rejects_bad_hash() {
        let err = translator()
            .get_layer2_deposit_address_by_owner_lock("0x1234", "0x", None)
            .unwrap_err();
        assert_eq!(
            err,
            AddressError::Codec(gw_bridge_types::Error::LengthMismatch {
                field: "owner_lock_hash".to_string(),
                expected: 32,
                actual: 2
            })
        );
        let err = translator()
            .get_layer2_deposit_address_by_owner_lock("1234", "0x", None)
            .unwrap_err();
        assert!(matches!(
            err,
            AddressError::Codec(gw_bridge_types::Error::InvalidHex { .. })
        ));
    }

    #[test]
    fn test_ckb_address_round_trip_and_network() {
        let translator = translator();
        let address = translator.eth_address_to_layer1_address(A1).unwrap();
        let lock = translator.eth_address_to_layer1_lock(A1).unwrap();
        assert_eq!(
            translator.ckb_address_to_lock_script_hash(&address).unwrap(),
            lock.hash()
        );

        let mut config = gw_bridge_config::testnet();
        config.network = NetworkType::Mainnet;
        config.address_format = AddressFormat::Full;
        let mainnet = AddressTranslator::new(config);
        assert_eq!(
            mainnet.ckb_address_to_lock_script_hash(&address),
            Err(AddressError::NetworkMismatch {
                expected: NetworkType::Mainnet,
                actual: NetworkType::Testnet
            })
        );
    }

    struct HexCodec;

    impl AddressCodec for HexCodec {
        fn encode(&self, script: &Script, _network: NetworkType) -> Result<String> {
            Ok(format!("0x{}", hex::encode(script.as_bytes())))
        }

        fn decode(&self, address: &str) -> Result<(NetworkType, Script)> {
            let bytes = parse_hex(address)?;
            Ok((NetworkType::Testnet, Script::from_slice(&bytes)?))
        }
    }

    #[test]
    fn test_injected_codec() {
        let translator = AddressTranslator::with_codec(gw_bridge_config::testnet(), HexCodec);
        let address = translator.eth_address_to_layer1_address(A1).unwrap();
        let lock = translator.eth_address_to_layer1_lock(A1).unwrap();
        assert_eq!(address, format!("0x{}", hex::encode(lock.as_bytes())));
        assert_eq!(
            translator.ckb_address_to_lock_script(&address).unwrap(),
            lock
        );
    }
}
