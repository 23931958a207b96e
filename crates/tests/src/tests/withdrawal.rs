use std::convert::TryInto;

use ckb_fixed_hash::H256;
use gw_bridge_hash::keccak256;
use gw_bridge_types::bytes::Bytes;
use gw_bridge_types::core::{CellOutput, Script, ScriptHashType, ONE_CKB};
use gw_bridge_types::global_state::{GlobalState, GLOBAL_STATE_SIZE};
use gw_bridge_types::prelude::Entity;
use gw_bridge_types::withdrawal::{
    build_withdrawal_lock_args, WithdrawalLockArgsV1, WithdrawalRequestExtra,
};
use gw_bridge_withdrawal::{LiveCell, WithdrawalError, WithdrawalParams};
use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, Secp256k1, SecretKey};

use crate::testing_tool::common::{
    testnet_withdrawal_builder, ETH_ADDRESS_2, PRIVKEY_2, WITHDRAWAL_LOCK_TYPE_HASH,
};

fn sign(message: [u8; 32]) -> Bytes {
    let key = SecretKey::from_slice(&hex::decode(PRIVKEY_2).unwrap()).unwrap();
    let message = Message::from_slice(&message).unwrap();
    let (recid, compact) = Secp256k1::new()
        .sign_ecdsa_recoverable(&message, &key)
        .serialize_compact();
    let mut signature = compact.to_vec();
    signature.push(recid.to_i32() as u8);
    signature.into()
}

fn recover(message: [u8; 32], signature: &[u8]) -> String {
    let recid = RecoveryId::from_i32(signature[64] as i32).unwrap();
    let signature = RecoverableSignature::from_compact(&signature[..64], recid).unwrap();
    let message = Message::from_slice(&message).unwrap();
    let pubkey = Secp256k1::new().recover_ecdsa(&message, &signature).unwrap();
    let address: [u8; 20] = keccak256(&pubkey.serialize_uncompressed()[1..])[12..]
        .try_into()
        .unwrap();
    format!("0x{}", hex::encode(address))
}

#[test]
fn test_can_withdraw() {
    let builder = testnet_withdrawal_builder();
    let result = builder.can_withdraw("250").unwrap();
    assert!(!result.allowed);
    assert_eq!(result.minimum.to_string(), "25400000000");

    let result = builder.can_withdraw("300").unwrap();
    assert!(result.allowed);
    assert_eq!(result.minimum.to_string(), "25400000000");

    assert!(builder.minimum_withdrawal_capacity(true) > builder.minimum_withdrawal_capacity(false));
}

#[test]
fn test_signed_withdrawal_request() {
    let _ = env_logger::builder().is_test(true).try_init();

    let builder = testnet_withdrawal_builder();
    let owner_lock = builder
        .translator()
        .eth_address_to_layer1_lock(ETH_ADDRESS_2)
        .unwrap();
    let params = WithdrawalParams {
        eth_address: ETH_ADDRESS_2,
        capacity: 400 * ONE_CKB,
        amount: 0,
        owner_lock: &owner_lock,
        fee: 0,
        nonce: 2,
        chain_id: gw_bridge_withdrawal::chain_id(71401, 0),
        sudt_script_hash: None,
    };
    let raw = builder.build_withdrawal_request(&params).unwrap();
    assert_eq!(
        raw.account_script_hash,
        builder.translator().layer2_eth_lock_hash(ETH_ADDRESS_2).unwrap()
    );

    let typed_data = builder
        .build_signable_message(&raw, &owner_lock, ETH_ADDRESS_2)
        .unwrap();
    let json = typed_data.to_json();
    assert_eq!(json["domain"]["name"], "Godwoken");
    assert_eq!(json["message"]["withdraw"]["ckbCapacity"], "40000000000");
    assert_eq!(json["message"]["layer1OwnerLock"]["hashType"], "type");

    let signature = sign(typed_data.signing_message());
    let extra = builder.assemble_signed_request(raw.clone(), signature.clone(), owner_lock.clone());
    let again = builder.assemble_signed_request(raw, signature, owner_lock);
    assert_eq!(extra.as_bytes(), again.as_bytes());

    let decoded = WithdrawalRequestExtra::from_slice(&extra.as_bytes()).unwrap();
    assert_eq!(
        recover(typed_data.signing_message(), &decoded.request.signature),
        ETH_ADDRESS_2.to_lowercase()
    );
}

#[test]
fn test_withdrawal_below_minimum() {
    let builder = testnet_withdrawal_builder();
    let owner_lock = builder
        .translator()
        .eth_address_to_layer1_lock(ETH_ADDRESS_2)
        .unwrap();
    let params = WithdrawalParams {
        eth_address: ETH_ADDRESS_2,
        capacity: 250 * ONE_CKB,
        amount: 0,
        owner_lock: &owner_lock,
        fee: 0,
        nonce: 0,
        chain_id: 71401,
        sudt_script_hash: None,
    };
    // the 22 bytes omni-lock args cost 2 CKB more than the minimum
    let err = builder.build_withdrawal_request(&params).unwrap_err();
    assert_eq!(
        err.to_string(),
        "withdrawal requires 256.0 CKB at least, provided 250.0"
    );
    assert!(matches!(err, WithdrawalError::BelowMinimumCapacity { .. }));
}

#[test]
fn test_collect_own_withdrawal_cells() {
    let builder = testnet_withdrawal_builder();
    let translator = builder.translator();
    let owner_lock = translator.eth_address_to_layer1_lock(ETH_ADDRESS_2).unwrap();
    let rollup_type_hash = translator.config().rollup_type_hash.clone();

    let cell = |index: u32, block_number: u64| {
        let lock_args = WithdrawalLockArgsV1 {
            account_script_hash: translator.layer2_eth_lock_hash(ETH_ADDRESS_2).unwrap(),
            withdrawal_block_hash: H256([index as u8; 32]),
            withdrawal_block_number: block_number,
            owner_lock_hash: owner_lock.hash(),
        };
        let args = build_withdrawal_lock_args(&rollup_type_hash, &lock_args, &owner_lock);
        LiveCell {
            tx_hash: H256([0x77; 32]),
            index,
            output: CellOutput {
                capacity: 400 * ONE_CKB,
                lock: Script::new(WITHDRAWAL_LOCK_TYPE_HASH, ScriptHashType::Type, args),
                type_: None,
            },
            data: Bytes::new(),
        }
    };

    let withdrawals =
        builder.filter_withdrawal_cells(vec![cell(0, 300), cell(1, 100)], &owner_lock.hash());
    let block_numbers: Vec<_> = withdrawals
        .iter()
        .map(|w| w.withdrawal_block_number)
        .collect();
    assert_eq!(block_numbers, vec![100, 300]);
    assert!(builder
        .filter_withdrawal_cells(vec![cell(2, 1)], &H256([0; 32]))
        .is_empty());

    // finalized up to block 200
    let mut data = vec![0u8; GLOBAL_STATE_SIZE];
    data[180..188].copy_from_slice(&200u64.to_le_bytes());
    let global_state = GlobalState::from_rollup_cell_data(&data).unwrap();
    let withdrawals = builder.collect_withdrawal_cells(
        vec![cell(0, 300), cell(1, 100), cell(2, 200)],
        &owner_lock.hash(),
        &global_state,
    );
    let finalized: Vec<_> = withdrawals.finalized.iter().map(|w| w.cell.index).collect();
    let pending: Vec<_> = withdrawals.pending.iter().map(|w| w.cell.index).collect();
    assert_eq!(finalized, vec![1, 2]);
    assert_eq!(pending, vec![0]);
}
