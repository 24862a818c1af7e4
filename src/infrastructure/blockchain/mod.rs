//! Blockchain infrastructure - RPC access, contract ABIs, wallet

pub mod contracts;
pub mod rpc_client;
pub mod wallet;

#[cfg(test)]
pub mod mock_client;

pub use rpc_client::{AlloyChainClient, ChainClient};
pub use wallet::load_signer;
