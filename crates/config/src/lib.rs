mod builtins;
mod config;

pub use builtins::testnet;
pub use config::*;
