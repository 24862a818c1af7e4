//! Fixtures shared by domain tests

use alloy::primitives::{address, Address, U256};
use std::time::Duration;

use crate::domain::payload::{DirectionConstants, PayloadTemplate, Word};
use crate::exchanges::types::{AmbientSettings, UniswapSettings, VenueSettings};
use crate::shared::types::{
    NativeCurrency, PercentRange, RetryPolicy, SampleRange, SwapProfile, TokenDescriptor,
};

pub const USDT: Address = address!("88b8E2161DEDC77EF4ab7585569D2415a1C1055D");
pub const USDC: Address = address!("f817257fed379853cDe0fa4F97AB987181B1E5Ea");
pub const SWAP_CONTRACT: Address = address!("88B96aF200c8a9c35442C8AC6cd3D22695AaE4F0");
pub const ROUTER: Address = address!("fb8e1c3b833f9e67a71c859a132cf783b645e436");
pub const WMON: Address = address!("760AfE86e5de5fa0Ee542fc7B7B713e1c5425701");

fn template() -> PayloadTemplate {
    PayloadTemplate {
        native_to_token: DirectionConstants {
            param5: Word::from_u64(0x8ca0),
            param10: Word::from_u64(0xffff),
            param11: Word::from_u64(0x18b37),
        },
        token_to_native: DirectionConstants {
            param5: Word::from_u64(0x8ca0),
            param10: Word::from_u64(0x10001),
            param11: Word::ZERO,
        },
    }
}

fn stable(symbol: &str, address: Address) -> TokenDescriptor {
    TokenDescriptor {
        symbol: symbol.to_string(),
        address,
        decimals: 6,
        payload: Some(template()),
    }
}

/// Ambient profile with USDT/USDC, no delays, 3 attempts
pub fn test_profile() -> SwapProfile {
    SwapProfile {
        name: "ambient".to_string(),
        venue: VenueSettings::Ambient(AmbientSettings {
            swap_contract: SWAP_CONTRACT,
            callpath: 1,
        }),
        native: NativeCurrency::default(),
        min_native_swap: U256::from(10_000_000_000_000_000u64),
        tokens: vec![stable("USDT", USDT), stable("USDC", USDC)],
        native_to_token: PercentRange::new(1_000, 3_000).unwrap(),
        token_to_native: PercentRange::new(100_000, 790_000).unwrap(),
        iterations: SampleRange::fixed(3),
        delay_ms: SampleRange::fixed(0),
        retry: RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
        explorer_tx_url: "https://testnet.monadexplorer.com/tx/".to_string(),
    }
}

/// Uniswap-V2 flavoured variant of [`test_profile`]
pub fn uniswap_profile() -> SwapProfile {
    SwapProfile {
        name: "uniswap".to_string(),
        venue: VenueSettings::UniswapV2(UniswapSettings {
            router: ROUTER,
            wrapped_native: WMON,
            slippage_bps: 900,
            deadline_secs: 1200,
        }),
        ..test_profile()
    }
}
