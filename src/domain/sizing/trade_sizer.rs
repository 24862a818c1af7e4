use alloy::primitives::U256;
use rand::Rng;

use crate::domain::route::Route;
use crate::math::apply_ppm;
use crate::shared::types::{Direction, SwapProfile};

/// A concrete trade size: `amount = floor(balance * ppm / 1e6)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeAmount {
    pub amount: U256,
    pub ppm: u32,
}

impl TradeAmount {
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

/// Draws a random share of a balance within the profile's per-direction range
pub struct TradeSizer<'a> {
    profile: &'a SwapProfile,
}

impl<'a> TradeSizer<'a> {
    pub fn new(profile: &'a SwapProfile) -> Self {
        Self { profile }
    }

    pub fn size<R: Rng + ?Sized>(&self, route: &Route, rng: &mut R) -> TradeAmount {
        self.size_balance(route.balance, route.direction, rng)
    }

    pub fn size_balance<R: Rng + ?Sized>(
        &self,
        balance: U256,
        direction: Direction,
        rng: &mut R,
    ) -> TradeAmount {
        let ppm = self.profile.percent_range(direction).sample(rng);
        TradeAmount {
            amount: apply_ppm(balance, ppm),
            ppm,
        }
    }
}
