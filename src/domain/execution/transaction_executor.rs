//! Transaction execution and confirmation

use tracing::info;

use crate::exchanges::types::{Confirmation, ContractCall};
use crate::infrastructure::blockchain::ChainClient;
use crate::shared::errors::ChainError;
use crate::shared::utils::explorer_link;

/// Sends one transaction at a time and waits for its receipt
pub struct TransactionExecutor<'a> {
    client: &'a dyn ChainClient,
    explorer_tx_url: &'a str,
}

impl<'a> TransactionExecutor<'a> {
    pub fn new(client: &'a dyn ChainClient, explorer_tx_url: &'a str) -> Self {
        Self {
            client,
            explorer_tx_url,
        }
    }

    /// Fetch the pending nonce, submit, then block until mined.
    pub async fn send(&self, call: &ContractCall) -> Result<Confirmation, ChainError> {
        let nonce = self.client.pending_nonce().await?;
        let tx_hash = self.client.submit(call, nonce).await?;
        info!(
            "{} sent (nonce {}): {}",
            call.label,
            nonce,
            explorer_link(self.explorer_tx_url, &tx_hash.to_string())
        );

        let confirmation = self.client.confirm(tx_hash).await?;
        info!(
            "{} confirmed in block {} (gas used: {})",
            call.label,
            confirmation
                .block_number
                .map(|b| b.to_string())
                .unwrap_or_else(|| "?".to_string()),
            confirmation
                .gas_used
                .map(|g| g.to_string())
                .unwrap_or_else(|| "n/a".to_string()),
        );
        Ok(confirmation)
    }
}
