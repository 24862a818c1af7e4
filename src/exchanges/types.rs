use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::infrastructure::blockchain::contracts::IERC20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VenueLabel {
    Ambient,
    UniswapV2,
}

impl VenueLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            VenueLabel::Ambient => "Ambient",
            VenueLabel::UniswapV2 => "Uniswap V2",
        }
    }
}

impl FromStr for VenueLabel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ambient" | "crocswap" => Ok(VenueLabel::Ambient),
            "uniswap" | "uniswap_v2" | "univ2" => Ok(VenueLabel::UniswapV2),
            _ => Err(anyhow::anyhow!("Unknown venue label: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmbientSettings {
    pub swap_contract: Address,
    pub callpath: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UniswapSettings {
    pub router: Address,
    pub wrapped_native: Address,
    pub slippage_bps: u32,
    pub deadline_secs: u64,
}

/// Venue-specific settings of a swap profile
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSettings {
    Ambient(AmbientSettings),
    UniswapV2(UniswapSettings),
}

impl VenueSettings {
    pub fn label(&self) -> VenueLabel {
        match self {
            VenueSettings::Ambient(_) => VenueLabel::Ambient,
            VenueSettings::UniswapV2(_) => VenueLabel::UniswapV2,
        }
    }
}

/// A state-changing contract call, not yet signed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCall {
    pub label: &'static str,
    pub to: Address,
    pub data: Bytes,
    pub value: U256,
}

impl ContractCall {
    /// ERC-20 `approve(spender, amount)`
    pub fn approve(token: Address, spender: Address, amount: U256) -> Self {
        Self {
            label: "approve",
            to: token,
            data: IERC20::approveCall { spender, amount }.abi_encode().into(),
            value: U256::ZERO,
        }
    }
}

/// A mined, successful transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: Option<u64>,
}
