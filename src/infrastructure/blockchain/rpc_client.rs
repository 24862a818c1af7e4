//! JSON-RPC access to the chain through alloy

use alloy::network::{EthereumWallet, TransactionBuilder};
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use async_trait::async_trait;
use tracing::debug;

use super::contracts::IERC20;
use crate::exchanges::types::{Confirmation, ContractCall};
use crate::shared::errors::ChainError;

/// Everything the bot needs from the chain, for one wallet
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the signing wallet
    fn address(&self) -> Address;

    async fn native_balance(&self) -> Result<U256, ChainError>;

    async fn token_balance(&self, token: Address) -> Result<U256, ChainError>;

    /// Nonce including pending transactions
    async fn pending_nonce(&self) -> Result<u64, ChainError>;

    /// `eth_call` against latest state
    async fn read(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError>;

    /// Sign and broadcast; returns once the node accepted the transaction
    async fn submit(&self, call: &ContractCall, nonce: u64) -> Result<TxHash, ChainError>;

    /// Wait for the receipt. A reverted receipt is an error.
    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation, ChainError>;
}

/// HTTP provider with a local signer
pub struct AlloyChainClient {
    provider: DynProvider,
    address: Address,
}

impl AlloyChainClient {
    pub fn connect(rpc_url: &str, signer: PrivateKeySigner) -> Result<Self, ChainError> {
        let url: Url = rpc_url
            .parse()
            .map_err(|e| ChainError::InvalidUrl(format!("{}: {}", rpc_url, e)))?;
        let address = signer.address();
        let provider = ProviderBuilder::new()
            .wallet(EthereumWallet::from(signer))
            .connect_http(url)
            .erased();
        Ok(Self { provider, address })
    }

    /// Chain id reported by the node; used as a startup connectivity check
    pub async fn chain_id(&self) -> Result<u64, ChainError> {
        self.provider
            .get_chain_id()
            .await
            .map_err(|e| ChainError::Rpc("chain id", e.to_string()))
    }
}

#[async_trait]
impl ChainClient for AlloyChainClient {
    fn address(&self) -> Address {
        self.address
    }

    async fn native_balance(&self) -> Result<U256, ChainError> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| ChainError::Rpc("get balance", e.to_string()))
    }

    async fn token_balance(&self, token: Address) -> Result<U256, ChainError> {
        let erc20 = IERC20::new(token, &self.provider);
        erc20
            .balanceOf(self.address)
            .call()
            .await
            .map_err(|e| ChainError::Rpc("balanceOf", e.to_string()))
    }

    async fn pending_nonce(&self) -> Result<u64, ChainError> {
        self.provider
            .get_transaction_count(self.address)
            .pending()
            .await
            .map_err(|e| ChainError::Rpc("get nonce", e.to_string()))
    }

    async fn read(&self, to: Address, data: Bytes) -> Result<Bytes, ChainError> {
        let request = TransactionRequest::default().with_to(to).with_input(data);
        self.provider
            .call(request)
            .await
            .map_err(|e| ChainError::Rpc("eth_call", e.to_string()))
    }

    async fn submit(&self, call: &ContractCall, nonce: u64) -> Result<TxHash, ChainError> {
        let request = TransactionRequest::default()
            .with_from(self.address)
            .with_to(call.to)
            .with_input(call.data.clone())
            .with_value(call.value)
            .with_nonce(nonce);
        debug!("Submitting {} to {} with nonce {}", call.label, call.to, nonce);
        let pending = self
            .provider
            .send_transaction(request)
            .await
            .map_err(|e| ChainError::Rpc("send transaction", e.to_string()))?;
        Ok(*pending.tx_hash())
    }

    async fn confirm(&self, tx_hash: TxHash) -> Result<Confirmation, ChainError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .get_receipt()
            .await
            .map_err(|e| ChainError::Rpc("wait for receipt", e.to_string()))?;
        if !receipt.status() {
            return Err(ChainError::Reverted(tx_hash.to_string()));
        }
        Ok(Confirmation {
            tx_hash,
            block_number: receipt.block_number,
            gas_used: Some(receipt.gas_used),
        })
    }
}
