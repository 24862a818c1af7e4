use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use tracing::info;

use super::types::{ContractCall, UniswapSettings, VenueLabel};
use super::SwapVenue;
use crate::domain::route::Route;
use crate::infrastructure::blockchain::contracts::IUniswapV2Router;
use crate::infrastructure::blockchain::ChainClient;
use crate::math::calculate_min_out;
use crate::shared::errors::SwapError;
use crate::shared::types::{Direction, TokenDescriptor};

/// Uniswap-V2 style router with native-currency entry points
pub struct UniswapV2Venue {
    settings: UniswapSettings,
}

impl UniswapV2Venue {
    pub fn new(settings: UniswapSettings) -> Self {
        Self { settings }
    }

    pub fn path(&self, direction: Direction, token: Address) -> Vec<Address> {
        match direction {
            Direction::NativeToToken => vec![self.settings.wrapped_native, token],
            Direction::TokenToNative => vec![token, self.settings.wrapped_native],
        }
    }

    /// Expected output of the last hop according to `getAmountsOut`
    pub async fn quote(
        &self,
        client: &dyn ChainClient,
        amount_in: U256,
        path: Vec<Address>,
    ) -> Result<U256, SwapError> {
        let data = IUniswapV2Router::getAmountsOutCall {
            amountIn: amount_in,
            path,
        }
        .abi_encode();
        let raw = client.read(self.settings.router, data.into()).await?;
        let amounts = IUniswapV2Router::getAmountsOutCall::abi_decode_returns(&raw)
            .map_err(|e| SwapError::Quote(e.to_string()))?;
        amounts
            .last()
            .copied()
            .ok_or_else(|| SwapError::Quote("router returned no amounts".to_string()))
    }

    fn deadline(&self) -> U256 {
        let now = chrono::Utc::now().timestamp().max(0) as u64;
        U256::from(now.saturating_add(self.settings.deadline_secs))
    }
}

#[async_trait]
impl SwapVenue for UniswapV2Venue {
    fn label(&self) -> VenueLabel {
        VenueLabel::UniswapV2
    }

    fn spender(&self) -> Address {
        self.settings.router
    }

    async fn swap_call(
        &self,
        client: &dyn ChainClient,
        route: &Route,
        token: &TokenDescriptor,
        amount: U256,
    ) -> Result<ContractCall, SwapError> {
        let path = self.path(route.direction, token.address);
        let expected = self.quote(client, amount, path.clone()).await?;
        let amount_out_min = calculate_min_out(expected, self.settings.slippage_bps);
        info!(
            "Quoted {} out (min {} at {} bps slippage)",
            expected, amount_out_min, self.settings.slippage_bps
        );
        let to = client.address();
        let deadline = self.deadline();
        let call = match route.direction {
            Direction::NativeToToken => ContractCall {
                label: "swapExactETHForTokens",
                to: self.settings.router,
                data: IUniswapV2Router::swapExactETHForTokensCall {
                    amountOutMin: amount_out_min,
                    path,
                    to,
                    deadline,
                }
                .abi_encode()
                .into(),
                value: amount,
            },
            Direction::TokenToNative => ContractCall {
                label: "swapExactTokensForETH",
                to: self.settings.router,
                data: IUniswapV2Router::swapExactTokensForETHCall {
                    amountIn: amount,
                    amountOutMin: amount_out_min,
                    path,
                    to,
                    deadline,
                }
                .abi_encode()
                .into(),
                value: U256::ZERO,
            },
        };
        Ok(call)
    }
}
