use crate::AddressTranslatorConfig;
use lazy_static::lazy_static;

pub fn testnet() -> AddressTranslatorConfig {
    lazy_static! {
        pub static ref CONFIG: AddressTranslatorConfig = {
            let content = include_str!("builtins/testnet.toml");
            toml::from_str(content).expect("builtin testnet config")
        };
    }
    CONFIG.clone()
}
