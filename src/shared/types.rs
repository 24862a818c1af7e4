//! Common types used across the application

use alloy::primitives::{Address, U256};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::payload::PayloadTemplate;
use crate::exchanges::types::VenueSettings;
use crate::math::PPM_DENOMINATOR;

/// Trade direction relative to the chain's native currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    NativeToToken,
    TokenToNative,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::NativeToToken => "native_to_token",
            Direction::TokenToNative => "token_to_native",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "native_to_token" | "buy" => Ok(Direction::NativeToToken),
            "token_to_native" | "sell" => Ok(Direction::TokenToNative),
            _ => Err(anyhow::anyhow!("Unknown direction: {}", s)),
        }
    }
}

/// Inclusive percentage range expressed in parts-per-million of a balance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PercentRange {
    min_ppm: u32,
    max_ppm: u32,
}

impl PercentRange {
    /// Returns `None` unless `min_ppm <= max_ppm <= 100%`.
    pub fn new(min_ppm: u32, max_ppm: u32) -> Option<Self> {
        if min_ppm > max_ppm || max_ppm > PPM_DENOMINATOR {
            return None;
        }
        Some(Self { min_ppm, max_ppm })
    }

    pub fn min_ppm(&self) -> u32 {
        self.min_ppm
    }

    pub fn max_ppm(&self) -> u32 {
        self.max_ppm
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.min_ppm..=self.max_ppm)
    }
}

/// Inclusive integer range used for iteration counts and delays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    min: u64,
    max: u64,
}

impl SampleRange {
    pub fn new(min: u64, max: u64) -> Option<Self> {
        (min <= max).then_some(Self { min, max })
    }

    pub fn fixed(value: u64) -> Self {
        Self { min: value, max: value }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u64 {
        rng.gen_range(self.min..=self.max)
    }
}

/// Bounded retry with a fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    /// Abort on the first failure.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(3000),
        }
    }
}

/// Native currency of the chain (MON on Monad testnet)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeCurrency {
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            symbol: "MON".to_string(),
            decimals: 18,
        }
    }
}

/// Token representation. Identity is the symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenDescriptor {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
    pub payload: Option<PayloadTemplate>,
}

/// Everything one swap run needs, fixed at startup
#[derive(Debug, Clone)]
pub struct SwapProfile {
    pub name: String,
    pub venue: VenueSettings,
    pub native: NativeCurrency,
    pub min_native_swap: U256,
    pub tokens: Vec<TokenDescriptor>,
    pub native_to_token: PercentRange,
    pub token_to_native: PercentRange,
    pub iterations: SampleRange,
    pub delay_ms: SampleRange,
    pub retry: RetryPolicy,
    pub explorer_tx_url: String,
}

impl SwapProfile {
    pub fn percent_range(&self, direction: Direction) -> PercentRange {
        match direction {
            Direction::NativeToToken => self.native_to_token,
            Direction::TokenToNative => self.token_to_native,
        }
    }

    pub fn token(&self, symbol: &str) -> Option<&TokenDescriptor> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }
}

/// ERC-20 handed out by the staking contract (gMON)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptToken {
    pub symbol: String,
    pub address: Address,
    pub decimals: u8,
}

/// Staking run settings
#[derive(Debug, Clone)]
pub struct StakingProfile {
    pub contract: Address,
    pub selector: [u8; 4],
    pub amount: U256,
    pub receipt_token: Option<ReceiptToken>,
    pub native: NativeCurrency,
    pub retry: RetryPolicy,
    pub explorer_tx_url: String,
}
