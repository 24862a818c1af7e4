//! Route domain - which trade to attempt next

mod route_selector;

pub use route_selector::RouteSelector;

use alloy::primitives::U256;
use serde::Serialize;

use crate::shared::types::Direction;

/// A (direction, token) choice for one iteration, with the input-side balance
/// it was chosen from. Never reused across iterations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub direction: Direction,
    pub token: String,
    /// Native balance for native→token, token balance for token→native
    pub balance: U256,
}

impl Route {
    pub fn label(&self, native_symbol: &str) -> String {
        match self.direction {
            Direction::NativeToToken => format!("{} → {}", native_symbol, self.token),
            Direction::TokenToNative => format!("{} → {}", self.token, native_symbol),
        }
    }
}

/// Wallet balances read at the start of an attempt, in configuration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BalanceSnapshot {
    pub native: U256,
    pub tokens: Vec<(String, U256)>,
}

impl BalanceSnapshot {
    pub fn token(&self, symbol: &str) -> U256 {
        self.tokens
            .iter()
            .find(|(s, _)| s == symbol)
            .map(|(_, balance)| *balance)
            .unwrap_or_default()
    }
}
