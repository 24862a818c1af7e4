//! Route selection with anti-repetition

use alloy::primitives::U256;
use rand::seq::SliceRandom;
use rand::Rng;

use super::{BalanceSnapshot, Route};
use crate::shared::types::{Direction, SwapProfile, TokenDescriptor};

/// Chooses the trade for each iteration from current balances
pub struct RouteSelector<'a> {
    profile: &'a SwapProfile,
}

impl<'a> RouteSelector<'a> {
    pub fn new(profile: &'a SwapProfile) -> Self {
        Self { profile }
    }

    fn native_feasible(&self, balances: &BalanceSnapshot) -> bool {
        !self.profile.tokens.is_empty() && balances.native >= self.profile.min_native_swap
    }

    /// Any non-zero token balance can be sold
    fn token_feasible(balance: U256) -> bool {
        !balance.is_zero()
    }

    /// Tokens that can currently be sold for native currency, with their balances
    pub fn sellable_tokens(&self, balances: &BalanceSnapshot) -> Vec<(&'a TokenDescriptor, U256)> {
        self.profile
            .tokens
            .iter()
            .filter_map(|token| {
                let balance = balances.token(&token.symbol);
                Self::token_feasible(balance).then_some((token, balance))
            })
            .collect()
    }

    /// Feasible directions after applying the anti-repetition rule
    pub fn candidate_directions(
        &self,
        balances: &BalanceSnapshot,
        previous: Option<Direction>,
    ) -> Vec<Direction> {
        let mut candidates = Vec::with_capacity(2);
        if self.native_feasible(balances) {
            candidates.push(Direction::NativeToToken);
        }
        if !self.sellable_tokens(balances).is_empty() {
            candidates.push(Direction::TokenToNative);
        }
        if let Some(previous) = previous {
            if candidates.len() >= 2 && candidates.contains(&previous) {
                candidates.retain(|d| *d != previous);
            }
        }
        candidates
    }

    /// Pick a route, or `None` when nothing is feasible this iteration
    pub fn select<R: Rng + ?Sized>(
        &self,
        balances: &BalanceSnapshot,
        previous: Option<Direction>,
        rng: &mut R,
    ) -> Option<Route> {
        let candidates = self.candidate_directions(balances, previous);
        let direction = *candidates.choose(rng)?;
        match direction {
            Direction::NativeToToken => {
                let token = self.profile.tokens.choose(rng)?;
                Some(Route {
                    direction,
                    token: token.symbol.clone(),
                    balance: balances.native,
                })
            }
            Direction::TokenToNative => {
                let sellable = self.sellable_tokens(balances);
                let (token, balance) = sellable.choose(rng)?;
                Some(Route {
                    direction,
                    token: token.symbol.clone(),
                    balance: *balance,
                })
            }
        }
    }

    /// Re-validate a route chosen earlier against fresh balances
    pub fn refresh(&self, pinned: &Route, balances: &BalanceSnapshot) -> Option<Route> {
        let token = self.profile.token(&pinned.token)?;
        let balance = match pinned.direction {
            Direction::NativeToToken => {
                if !self.native_feasible(balances) {
                    return None;
                }
                balances.native
            }
            Direction::TokenToNative => {
                let balance = balances.token(&token.symbol);
                if !Self::token_feasible(balance) {
                    return None;
                }
                balance
            }
        };
        Some(Route {
            direction: pinned.direction,
            token: token.symbol.clone(),
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::testing::test_profile;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot(native: u64, usdt: u64, usdc: u64) -> BalanceSnapshot {
        BalanceSnapshot {
            native: U256::from(native),
            tokens: vec![
                ("USDT".to_string(), U256::from(usdt)),
                ("USDC".to_string(), U256::from(usdc)),
            ],
        }
    }

    const ONE_MON: u64 = 1_000_000_000_000_000_000;

    #[test]
    fn test_no_feasible_route() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(selector.select(&snapshot(0, 0, 0), None, &mut rng), None);
        // Native below the 0.01 MON minimum, no tokens
        assert_eq!(selector.select(&snapshot(9_999_999_999_999_999, 0, 0), None, &mut rng), None);
    }

    #[test]
    fn test_fractional_token_balance_is_sellable() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let mut rng = StdRng::seed_from_u64(5);
        // 0.5 USDT and no spendable MON
        let route = selector
            .select(&snapshot(0, 500_000, 0), None, &mut rng)
            .unwrap();
        assert_eq!(route.direction, Direction::TokenToNative);
        assert_eq!(route.token, "USDT");
        assert_eq!(route.balance, U256::from(500_000u64));
        assert_eq!(selector.select(&snapshot(0, 1, 0), None, &mut rng).unwrap().token, "USDT");
    }

    #[test]
    fn test_never_repeats_when_alternative_exists() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let mut rng = StdRng::seed_from_u64(2);
        let balances = snapshot(ONE_MON, 5_000_000, 7_000_000);
        for _ in 0..200 {
            let route = selector
                .select(&balances, Some(Direction::NativeToToken), &mut rng)
                .unwrap();
            assert_eq!(route.direction, Direction::TokenToNative);
            let route = selector
                .select(&balances, Some(Direction::TokenToNative), &mut rng)
                .unwrap();
            assert_eq!(route.direction, Direction::NativeToToken);
        }
    }

    #[test]
    fn test_single_feasible_direction_ignores_history() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let mut rng = StdRng::seed_from_u64(3);
        let only_native = snapshot(ONE_MON, 0, 0);
        for _ in 0..50 {
            let route = selector
                .select(&only_native, Some(Direction::NativeToToken), &mut rng)
                .unwrap();
            assert_eq!(route.direction, Direction::NativeToToken);
            assert_eq!(route.balance, U256::from(ONE_MON));
        }
        let only_tokens = snapshot(0, 0, 2_000_000);
        for _ in 0..50 {
            let route = selector
                .select(&only_tokens, Some(Direction::TokenToNative), &mut rng)
                .unwrap();
            assert_eq!(route.direction, Direction::TokenToNative);
            assert_eq!(route.token, "USDC");
            assert_eq!(route.balance, U256::from(2_000_000u64));
        }
    }

    #[test]
    fn test_native_route_picks_every_token_eventually() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let mut rng = StdRng::seed_from_u64(4);
        let balances = snapshot(ONE_MON, 0, 0);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(selector.select(&balances, None, &mut rng).unwrap().token);
        }
        assert_eq!(seen.len(), 2);
    }

    #[test]
    fn test_refresh_drops_route_that_became_infeasible() {
        let profile = test_profile();
        let selector = RouteSelector::new(&profile);
        let pinned = Route {
            direction: Direction::TokenToNative,
            token: "USDT".to_string(),
            balance: U256::from(5_000_000u64),
        };
        let refreshed = selector.refresh(&pinned, &snapshot(0, 4_000_000, 0)).unwrap();
        assert_eq!(refreshed.balance, U256::from(4_000_000u64));
        assert!(selector.refresh(&pinned, &snapshot(ONE_MON, 0, 9_000_000)).is_none());
    }
}
