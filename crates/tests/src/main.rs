//! End-to-end scenarios of the bridge crates against the testnet deployment.

use clap::{App, Arg, SubCommand};
use gw_bridge_withdrawal::HumanCapacity;

#[cfg_attr(not(test), allow(dead_code))]
mod testing_tool;
#[cfg(test)]
mod tests;

use testing_tool::common::{testnet_translator, testnet_withdrawal_builder};

fn main() -> Result<(), String> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    let mut app = App::new("godwoken bridge tests")
        .about("Godwoken bridge derivations on testnet")
        .subcommand(
            SubCommand::with_name("address")
                .about("Print the addresses derived from an eth address")
                .arg(
                    Arg::with_name("eth-address")
                        .long("eth-address")
                        .short("e")
                        .takes_value(true)
                        .required(true)
                        .help("0x prefixed eth address"),
                ),
        )
        .subcommand(
            SubCommand::with_name("can-withdraw")
                .about("Check a CKB amount against the minimal withdrawal capacity")
                .arg(
                    Arg::with_name("amount")
                        .long("amount")
                        .short("a")
                        .takes_value(true)
                        .required(true)
                        .help("CKB amount, e.g. 300 or 254.5"),
                ),
        );
    let matches = app.clone().get_matches();
    match matches.subcommand() {
        ("address", Some(m)) => {
            let eth_address = m.value_of("eth-address").unwrap_or_default();
            let translator = testnet_translator();
            let layer1_address = translator
                .eth_address_to_ckb_address(eth_address)
                .map_err(|err| err.to_string())?;
            let layer2_lock_hash = translator
                .layer2_eth_lock_hash(eth_address)
                .map_err(|err| err.to_string())?;
            let deposit_address = translator
                .get_layer2_deposit_address(eth_address)
                .map_err(|err| err.to_string())?;
            println!("layer1 address: {}", layer1_address);
            println!("layer2 lock hash: {:#x}", layer2_lock_hash);
            println!("deposit address: {}", deposit_address);
        }
        ("can-withdraw", Some(m)) => {
            let amount = m.value_of("amount").unwrap_or_default();
            let result = testnet_withdrawal_builder()
                .can_withdraw(amount)
                .map_err(|err| err.to_string())?;
            println!(
                "allowed: {}, minimum: {:#}",
                result.allowed,
                HumanCapacity(result.minimum)
            );
        }
        _ => {
            app.print_help().map_err(|err| err.to_string())?;
            println!();
        }
    }
    Ok(())
}
