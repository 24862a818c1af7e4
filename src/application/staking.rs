//! Native staking run: one `stake()` call, then a balance report

use alloy::primitives::Bytes;
use tracing::{info, warn};

use crate::domain::execution::TransactionExecutor;
use crate::exchanges::types::{Confirmation, ContractCall};
use crate::infrastructure::blockchain::ChainClient;
use crate::shared::errors::{AppError, ChainError};
use crate::shared::retry::retry_with_policy;
use crate::shared::types::StakingProfile;
use crate::shared::utils::format_amount;

pub struct StakingRunner<'a> {
    profile: &'a StakingProfile,
    client: &'a dyn ChainClient,
}

impl<'a> StakingRunner<'a> {
    pub fn new(profile: &'a StakingProfile, client: &'a dyn ChainClient) -> Self {
        Self { profile, client }
    }

    /// Calldata is the bare selector; the stake amount travels as value.
    pub fn stake_call(&self) -> ContractCall {
        ContractCall {
            label: "stake",
            to: self.profile.contract,
            data: Bytes::copy_from_slice(&self.profile.selector),
            value: self.profile.amount,
        }
    }

    pub async fn run(&self) -> Result<Confirmation, AppError> {
        let native = &self.profile.native;
        let balance = self.client.native_balance().await?;
        info!(
            "Staking {} {} from {} (balance {} {})",
            format_amount(self.profile.amount, native.decimals),
            native.symbol,
            self.client.address(),
            format_amount(balance, native.decimals),
            native.symbol
        );

        let executor = TransactionExecutor::new(self.client, &self.profile.explorer_tx_url);
        let executor = &executor;
        let call = self.stake_call();
        let call = &call;
        let confirmation = retry_with_policy(self.profile.retry, move |attempt| {
            info!("Stake attempt {}/{}", attempt, self.profile.retry.max_attempts);
            executor.send(call)
        })
        .await?;
        info!(
            "Stake confirmed in block {}",
            confirmation
                .block_number
                .map(|b| b.to_string())
                .unwrap_or_else(|| "?".to_string())
        );

        self.log_balances().await?;
        Ok(confirmation)
    }

    async fn log_balances(&self) -> Result<(), ChainError> {
        let native = &self.profile.native;
        let balance = self.client.native_balance().await?;
        info!(
            "Remaining balance: {} {}",
            format_amount(balance, native.decimals),
            native.symbol
        );
        if let Some(receipt) = &self.profile.receipt_token {
            match self.client.token_balance(receipt.address).await {
                Ok(amount) => info!(
                    "{} balance: {}",
                    receipt.symbol,
                    format_amount(amount, receipt.decimals)
                ),
                Err(e) => warn!("Could not read {} balance: {}", receipt.symbol, e),
            }
        }
        Ok(())
    }
}
