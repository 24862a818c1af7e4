use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use super::types::{AmbientSettings, ContractCall, VenueLabel};
use super::SwapVenue;
use crate::domain::payload::UserCmdPayload;
use crate::domain::route::Route;
use crate::infrastructure::blockchain::ChainClient;
use crate::shared::errors::SwapError;
use crate::shared::types::{Direction, TokenDescriptor};

/// Ambient (CrocSwap) DEX, driven through `userCmd` with hand-laid calldata
pub struct AmbientVenue {
    settings: AmbientSettings,
}

impl AmbientVenue {
    pub fn new(settings: AmbientSettings) -> Self {
        Self { settings }
    }

    pub fn build_payload(
        &self,
        direction: Direction,
        token: &TokenDescriptor,
        amount: U256,
    ) -> Result<UserCmdPayload, SwapError> {
        let template = token
            .payload
            .as_ref()
            .ok_or_else(|| SwapError::UnknownToken(token.symbol.clone()))?;
        Ok(UserCmdPayload::build(
            self.settings.callpath,
            token.address,
            amount,
            direction,
            template.constants(direction),
        ))
    }
}

#[async_trait]
impl SwapVenue for AmbientVenue {
    fn label(&self) -> VenueLabel {
        VenueLabel::Ambient
    }

    fn spender(&self) -> Address {
        self.settings.swap_contract
    }

    async fn swap_call(
        &self,
        _client: &dyn ChainClient,
        route: &Route,
        token: &TokenDescriptor,
        amount: U256,
    ) -> Result<ContractCall, SwapError> {
        let payload = self.build_payload(route.direction, token, amount)?;
        let value = match route.direction {
            Direction::NativeToToken => amount,
            Direction::TokenToNative => U256::ZERO,
        };
        Ok(ContractCall {
            label: "userCmd",
            to: self.settings.swap_contract,
            data: payload.calldata(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::{test_profile, SWAP_CONTRACT};
    use crate::infrastructure::blockchain::mock_client::ScriptedChainClient;
    use crate::exchanges::types::VenueSettings;

    fn venue() -> AmbientVenue {
        match test_profile().venue {
            VenueSettings::Ambient(settings) => AmbientVenue::new(settings),
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_buy_carries_native_value() {
        let profile = test_profile();
        let client = ScriptedChainClient::new(U256::ZERO);
        let route = Route {
            direction: Direction::NativeToToken,
            token: "USDT".to_string(),
            balance: U256::from(1_000_000u64),
        };
        let call = venue()
            .swap_call(&client, &route, &profile.tokens[0], U256::from(2_000u64))
            .await
            .unwrap();
        assert_eq!(call.to, SWAP_CONTRACT);
        assert_eq!(call.value, U256::from(2_000u64));
        assert_eq!(call.data.len(), 4 + 13 * 32);
    }

    #[tokio::test]
    async fn test_sell_sends_no_value() {
        let profile = test_profile();
        let client = ScriptedChainClient::new(U256::ZERO);
        let route = Route {
            direction: Direction::TokenToNative,
            token: "USDC".to_string(),
            balance: U256::from(5_000_000u64),
        };
        let call = venue()
            .swap_call(&client, &route, &profile.tokens[1], U256::from(500_000u64))
            .await
            .unwrap();
        assert_eq!(call.value, U256::ZERO);
        assert!(client.events().is_empty());
    }

    #[test]
    fn test_token_without_template_is_rejected() {
        let mut token = test_profile().tokens[0].clone();
        token.payload = None;
        let err = venue()
            .build_payload(Direction::NativeToToken, &token, U256::from(1u8))
            .unwrap_err();
        assert!(matches!(err, SwapError::UnknownToken(_)));
    }
}
