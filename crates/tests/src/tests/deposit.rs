use ckb_fixed_hash::{h256, H256};
use gw_bridge_address::AddressTranslator;
use gw_bridge_types::core::{Script, ScriptHashType};
use gw_bridge_types::deposit::DepositLockArgs;
use gw_bridge_types::prelude::Entity;
use gw_bridge_types::since::{Since, DEFAULT_DEPOSIT_CANCEL_TIMEOUT};

use crate::testing_tool::common::{
    legacy_deposit_config, testnet_translator, ETH_ADDRESS_1, ETH_ADDRESS_2,
};

const V1_CANCEL_TIMEOUT: Since = Since::from_raw_value(0xc000_0000_0009_3a81);

#[test]
fn test_v1_deposit_address() {
    let _ = env_logger::builder().is_test(true).try_init();

    let translator = testnet_translator();
    let address = translator
        .get_layer2_deposit_address_with_timeout(ETH_ADDRESS_2, Some(V1_CANCEL_TIMEOUT))
        .unwrap();
    assert_eq!(
        address,
        "ckt1q3g8qjuyaj6vfvftg0r6evnqmhtfzuwzrdxqhg2l83rfklg58ah3suprt8487pe4tzfpadgd3sw806f0wcxglpjkhhjfjhexhztrutwc4yqqqqq5qqqqqdqqqqqf6qqqqzjsqqqqhy0z4ehvactg6n9kyh7pjuyd3lkwcmfjt3ymfpwe00tghn5s483xjqqqqqgqqqqqxqqqqqp3qqqqqp6jr5923enw73q7hscjqnvxhv3leqlfahzccxwmkxcwhejrxmkqqy6qqqqqwq34n6nlqu643ys7k5xcc8rhayhhvry0settmeyetunt39379hvdzue38fgl3lphhnm826d5vw4a38vps38czwsfqqqqqqxqqgqqqqqzy48xe"
    );

    // the same deposit, spelled with the owner lock hash
    let by_owner_lock = translator
        .get_layer2_deposit_address_by_owner_lock(
            "0xb91e2ae6ecee168d4cb625fc19708d8fecec6d325c49b485d97bd68bce90a9e2",
            ETH_ADDRESS_2,
            Some(V1_CANCEL_TIMEOUT),
        )
        .unwrap();
    assert_eq!(by_owner_lock, address);

    // the address decodes back to the deposit lock
    let lock = translator.ckb_address_to_lock_script(&address).unwrap();
    let (rollup_type_hash, args) = DepositLockArgs::from_lock_args(&lock.args).unwrap();
    assert_eq!(rollup_type_hash, translator.config().rollup_type_hash);
    assert_eq!(args.registry_id, Some(2));
    assert_eq!(args.cancel_timeout, V1_CANCEL_TIMEOUT);
    assert_eq!(
        args.layer2_lock.hash(),
        translator.layer2_eth_lock_hash(ETH_ADDRESS_2).unwrap()
    );
}

#[test]
fn test_legacy_deposit_address() {
    let translator = AddressTranslator::new(legacy_deposit_config());
    assert_eq!(
        translator.get_layer2_deposit_address(ETH_ADDRESS_1).unwrap(),
        "ckt1q3g8qjuyaj6vfvftg0r6evnqmhtfzuwzrdxqhg2l83rfklg58ah3suprt8487pe4tzfpadgd3sw806f0wcxglpjkhhjfjhexhztrutwc5yqqqqqsqqqqqvqqqqqfjqqqqqaytpzxduzxash5rhr4wvf02nxxc55rnx9cpgske3mvvxms9kduj6gqqqqpqqqqqqcqqqqqxyqqqqq82gws428xdm6yr67rzgzds6aj8lyra8kutrqemwcmp6lxgvmwcqqngqqqqpczxk020urn2kyjr66smrquwl5j7asv37r9d00yn90jdwyk8ckasqvrxtnmvnspy34lexquwhu0tfd3sy2lqq9rqgqqqqqqcqcw9ff7"
    );
    assert_eq!(
        translator.get_layer2_deposit_address(ETH_ADDRESS_2).unwrap(),
        "ckt1q3g8qjuyaj6vfvftg0r6evnqmhtfzuwzrdxqhg2l83rfklg58ah3suprt8487pe4tzfpadgd3sw806f0wcxglpjkhhjfjhexhztrutwc5yqqqqqsqqqqqvqqqqqfjqqqqzu3u2hxanhpdr2vkcjlcxts3k87emrdxfwyndy9m9aadz7wjz57y6gqqqqpqqqqqqcqqqqqxyqqqqq82gws428xdm6yr67rzgzds6aj8lyra8kutrqemwcmp6lxgvmwcqqngqqqqpczxk020urn2kyjr66smrquwl5j7asv37r9d00yn90jdwyk8cka35tnxya9r78ux770vatfk336hkyasxzy7q9rqgqqqqqqcq65fd58"
    );
}

#[test]
fn test_deposit_from_default_lock() {
    let translator = testnet_translator();
    let ckb_address = translator.eth_address_to_ckb_address(ETH_ADDRESS_2).unwrap();
    assert_eq!(
        translator
            .get_default_lock_layer2_deposit_address(&ckb_address, ETH_ADDRESS_2)
            .unwrap(),
        translator.get_layer2_deposit_address(ETH_ADDRESS_2).unwrap()
    );
}

#[test]
fn test_deposit_lock_args_table_layout() {
    let args = DepositLockArgs {
        owner_lock_hash: H256([0u8; 32]),
        layer2_lock: Script::new(H256([0x11; 32]), ScriptHashType::Type, Vec::new()),
        cancel_timeout: Since::from_raw_value(0),
        registry_id: None,
    };
    let bytes = args.as_bytes();

    let script_size = 16 + 32 + 1 + 4;
    assert_eq!(bytes.len(), 16 + 32 + script_size + 8);
    assert_eq!(
        hex::encode(&bytes[..16]),
        "6d000000100000003000000065000000"
    );
    assert_eq!(&bytes[16..48], &[0u8; 32][..]);
    assert_eq!(&bytes[101..], &[0u8; 8][..]);
    assert_eq!(
        args.layer2_lock.hash(),
        h256!("0xc67fad3750df008735c6241ed7930b4604afe1ec9a2a578eeff56958632ba009")
    );
    assert_eq!(DepositLockArgs::from_slice(&bytes).unwrap(), args);
}

#[test]
fn test_default_cancel_timeout() {
    let translator = testnet_translator();
    let owner_lock_hash = H256([0x42; 32]);
    let args = translator.deposit_lock_args(&owner_lock_hash, &[0x01; 20], None);
    assert_eq!(args.cancel_timeout, DEFAULT_DEPOSIT_CANCEL_TIMEOUT);
    assert_eq!(args.cancel_timeout.value(), 0xc000_0000_0002_a300);
    assert!(args.cancel_timeout.is_relative());

    let shorter = translator.deposit_lock_args(
        &owner_lock_hash,
        &[0x01; 20],
        Some(Since::relative_timestamp(3600)),
    );
    assert_ne!(
        translator.deposit_lock(&shorter).hash(),
        translator.deposit_lock(&args).hash()
    );
}
