pub mod ambient;
pub mod uniswap_v2;
pub mod types;

use alloy::primitives::{Address, U256};
use async_trait::async_trait;

use crate::domain::route::Route;
use crate::exchanges::types::{ContractCall, VenueLabel, VenueSettings};
use crate::infrastructure::blockchain::ChainClient;
use crate::shared::errors::SwapError;
use crate::shared::types::TokenDescriptor;

/// A contract the bot can swap through
#[async_trait]
pub trait SwapVenue: Send + Sync {
    fn label(&self) -> VenueLabel;

    /// Contract that pulls tokens on token→native swaps and must be approved
    fn spender(&self) -> Address;

    /// Build the swap transaction for `amount` of the route's input asset
    async fn swap_call(
        &self,
        client: &dyn ChainClient,
        route: &Route,
        token: &TokenDescriptor,
        amount: U256,
    ) -> Result<ContractCall, SwapError>;
}

pub fn create_venue(settings: &VenueSettings) -> Box<dyn SwapVenue> {
    match settings {
        VenueSettings::Ambient(s) => Box::new(ambient::AmbientVenue::new(s.clone())),
        VenueSettings::UniswapV2(s) => Box::new(uniswap_v2::UniswapV2Venue::new(s.clone())),
    }
}
