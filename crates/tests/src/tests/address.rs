use ckb_fixed_hash::h256;
use gw_bridge_address::{AddressError, AddressTranslator};
use gw_bridge_config::NetworkType;

use crate::testing_tool::common::{
    full_format_config, testnet_translator, ETH_ADDRESS_1, ETH_ADDRESS_2,
};

#[test]
fn test_eth_address_to_ckb_address() {
    let _ = env_logger::builder().is_test(true).try_init();

    let translator = testnet_translator();
    assert_eq!(
        translator.eth_address_to_ckb_address(ETH_ADDRESS_1).unwrap(),
        "ckt1q3uljza4azfdsrwjzdpea6442yfqadqhv7yzfu5zknlmtusm45hpuqgpsvew0djwqyjxhlycr36l3ad9kxq3tuqqlmmcjj"
    );

    let translator = AddressTranslator::new(full_format_config());
    assert_eq!(
        translator.eth_address_to_layer1_address(ETH_ADDRESS_1).unwrap(),
        "ckt1qpuljza4azfdsrwjzdpea6442yfqadqhv7yzfu5zknlmtusm45hpuqgpqxpn9eakfcqjg6lunqw8t7845kccz90sqqr5w9f8"
    );
}

#[test]
fn test_layer1_lock_hash() {
    let translator = testnet_translator();
    let lock = translator.eth_address_to_layer1_lock(ETH_ADDRESS_1).unwrap();
    assert_eq!(
        lock.hash(),
        h256!("0x3a4584466f046ec2f41dc757312f54cc6c5283998b80a216cc76c61b702d9bc9")
    );
    let lock = translator.eth_address_to_layer1_lock(ETH_ADDRESS_2).unwrap();
    assert_eq!(
        lock.hash(),
        h256!("0xb91e2ae6ecee168d4cb625fc19708d8fecec6d325c49b485d97bd68bce90a9e2")
    );

    // case of the hex digits is irrelevant
    let lower = translator
        .eth_address_to_layer1_lock(&ETH_ADDRESS_2.to_lowercase())
        .unwrap();
    assert_eq!(lower, lock);
}

#[test]
fn test_ckb_address_to_lock_script_hash() {
    let translator = testnet_translator();
    let address = translator.eth_address_to_ckb_address(ETH_ADDRESS_2).unwrap();
    assert_eq!(
        translator.ckb_address_to_lock_script_hash(&address).unwrap(),
        h256!("0xb91e2ae6ecee168d4cb625fc19708d8fecec6d325c49b485d97bd68bce90a9e2")
    );

    let full = AddressTranslator::new(full_format_config())
        .eth_address_to_layer1_address(ETH_ADDRESS_2)
        .unwrap();
    assert_eq!(
        translator.ckb_address_to_lock_script_hash(&full).unwrap(),
        h256!("0xb91e2ae6ecee168d4cb625fc19708d8fecec6d325c49b485d97bd68bce90a9e2")
    );
}

#[test]
fn test_layer2_lock_hash_and_short_address() {
    let translator = testnet_translator();
    let lock_hash_1 = translator.layer2_eth_lock_hash(ETH_ADDRESS_1).unwrap();
    assert_eq!(
        lock_hash_1,
        h256!("0x19f5ff51a85eed3b40f2cda333e10d716c9054204e0ef0a49dfd6ac2c37e07a6")
    );
    let lock_hash_2 = translator.layer2_eth_lock_hash(ETH_ADDRESS_2).unwrap();
    assert_eq!(
        lock_hash_2,
        h256!("0x7e826dc457f273661797c39c34a9955e16d2efbcaaa56b1148ebe629beb5f4a4")
    );

    let short_address = translator
        .eth_address_to_godwoken_short_address(ETH_ADDRESS_2)
        .unwrap();
    assert_eq!(short_address.as_bytes(), &lock_hash_2.as_bytes()[..20]);
}

#[test]
fn test_malformed_addresses_fail() {
    let translator = testnet_translator();
    for eth_address in [
        "018332E7b64E01246BfC981C75f8f5A5B18115F0",
        "0x018332E7b64E01246BfC981C75f8f5A5B18115F",
        "0x018332E7b64E01246BfC981C75f8f5A5B18115F0aa",
        "0x018332E7b64E01246BfC981C75f8f5A5B18115Fg",
    ] {
        assert!(matches!(
            translator.eth_address_to_godwoken_short_address(eth_address),
            Err(AddressError::InvalidEthAddress(_))
        ));
    }

    let mainnet = "ckb1qyqt8xaupvm8837nv3gtc9x0ekkj64vud3jqfwyw5v";
    assert!(matches!(
        translator.ckb_address_to_lock_script_hash(mainnet),
        Err(AddressError::NetworkMismatch {
            expected: NetworkType::Testnet,
            actual: NetworkType::Mainnet,
        })
    ));
    assert!(translator.ckb_address_to_lock_script_hash("ckt1xxxx").is_err());
}
