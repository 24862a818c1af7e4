// src/config.rs
use alloy::primitives::utils::parse_units;
use alloy::primitives::{Address, U256};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use std::{fs, path::Path};

use crate::application::sequence::Stage;
use crate::domain::payload::{DirectionConstants, PayloadTemplate, Word};
use crate::exchanges::types::{AmbientSettings, UniswapSettings, VenueSettings};
use crate::math::{percent_to_ppm, BPS_DENOMINATOR};
use crate::shared::errors::ConfigError;
use crate::shared::types::{
    NativeCurrency, PercentRange, ReceiptToken, RetryPolicy, SampleRange, StakingProfile,
    SwapProfile, TokenDescriptor,
};

#[derive(Debug, Clone, Deserialize)]
pub struct RpcCfg {
    pub url: String,
    #[serde(default = "default_explorer")]
    pub explorer_tx_url: String,
}

fn default_explorer() -> String {
    "https://testnet.monadexplorer.com/tx/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct WalletCfg {
    pub private_key_path: String,
}

impl Default for WalletCfg {
    fn default() -> Self {
        Self {
            private_key_path: "privatekey.txt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NativeCfg {
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCfg {
    fn default() -> Self {
        let native = NativeCurrency::default();
        Self {
            symbol: native.symbol,
            decimals: native.decimals,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RetryCfg {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_retry_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    3000
}

impl Default for RetryCfg {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_retry_delay_ms(),
        }
    }
}

/// Hex constants of one (token, direction) `userCmd` layout
#[derive(Debug, Clone, Deserialize)]
pub struct ConstantsCfg {
    pub param5: String,
    pub param10: String,
    pub param11: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenCfg {
    pub symbol: String,
    pub address: String,
    pub decimals: u8,
    pub native_to_token: Option<ConstantsCfg>,
    pub token_to_native: Option<ConstantsCfg>,
}

/// Fields shared by every swap venue section
#[derive(Debug, Clone, Deserialize)]
pub struct TradingCfg {
    pub min_native_swap: String,
    /// [min, max] percentage of the native balance per buy
    pub native_to_token_percent: [String; 2],
    /// [min, max] percentage of the token balance per sell
    pub token_to_native_percent: [String; 2],
    pub iterations: [u64; 2],
    pub delay_ms: [u64; 2],
    pub retry: Option<RetryCfg>,
    pub tokens: Vec<TokenCfg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AmbientCfg {
    pub swap_contract: String,
    #[serde(default = "default_callpath")]
    pub callpath: u16,
    #[serde(flatten)]
    pub trading: TradingCfg,
}

fn default_callpath() -> u16 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct UniswapCfg {
    pub router: String,
    pub wrapped_native: String,
    #[serde(default = "default_slippage_bps")]
    pub slippage_bps: u32,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    #[serde(flatten)]
    pub trading: TradingCfg,
}

fn default_slippage_bps() -> u32 {
    900
}

fn default_deadline_secs() -> u64 {
    1200
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptTokenCfg {
    pub symbol: String,
    pub address: String,
    #[serde(default = "default_decimals")]
    pub decimals: u8,
}

fn default_decimals() -> u8 {
    18
}

#[derive(Debug, Clone, Deserialize)]
pub struct StakingCfg {
    pub contract: String,
    #[serde(default = "default_stake_selector")]
    pub selector: String,
    #[serde(default = "default_stake_amount")]
    pub amount: String,
    pub retry: Option<RetryCfg>,
    pub receipt_token: Option<ReceiptTokenCfg>,
}

fn default_stake_selector() -> String {
    "0xd5575982".to_string()
}

fn default_stake_amount() -> String {
    "0.01".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SequenceCfg {
    pub stages: Vec<Stage>,
}

impl Default for SequenceCfg {
    fn default() -> Self {
        Self {
            stages: Stage::default_sequence(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub rpc: RpcCfg,
    #[serde(default)]
    pub wallet: WalletCfg,
    #[serde(default)]
    pub native: NativeCfg,
    #[serde(default)]
    pub retry: RetryCfg,
    pub ambient: Option<AmbientCfg>,
    pub uniswap: Option<UniswapCfg>,
    pub staking: Option<StakingCfg>,
    #[serde(default)]
    pub sequence: SequenceCfg,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e.to_string()))?;
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn native_currency(&self) -> NativeCurrency {
        NativeCurrency {
            symbol: self.native.symbol.clone(),
            decimals: self.native.decimals,
        }
    }

    fn retry_policy(&self, section: Option<&RetryCfg>) -> Result<RetryPolicy, ConfigError> {
        let cfg = section.unwrap_or(&self.retry);
        if cfg.max_attempts == 0 {
            return Err(ConfigError::Invalid(
                "retry.max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(RetryPolicy {
            max_attempts: cfg.max_attempts,
            delay: Duration::from_millis(cfg.delay_ms),
        })
    }

    /// Validated Ambient swap profile
    pub fn ambient_profile(&self) -> Result<SwapProfile, ConfigError> {
        let cfg = self
            .ambient
            .as_ref()
            .ok_or(ConfigError::MissingSection("ambient"))?;
        let venue = VenueSettings::Ambient(AmbientSettings {
            swap_contract: parse_address("ambient.swap_contract", &cfg.swap_contract)?,
            callpath: cfg.callpath,
        });
        self.swap_profile("ambient", venue, &cfg.trading, true)
    }

    /// Validated Uniswap-V2 swap profile
    pub fn uniswap_profile(&self) -> Result<SwapProfile, ConfigError> {
        let cfg = self
            .uniswap
            .as_ref()
            .ok_or(ConfigError::MissingSection("uniswap"))?;
        if cfg.slippage_bps >= BPS_DENOMINATOR {
            return Err(ConfigError::Invalid(format!(
                "uniswap.slippage_bps must be below {}",
                BPS_DENOMINATOR
            )));
        }
        let venue = VenueSettings::UniswapV2(UniswapSettings {
            router: parse_address("uniswap.router", &cfg.router)?,
            wrapped_native: parse_address("uniswap.wrapped_native", &cfg.wrapped_native)?,
            slippage_bps: cfg.slippage_bps,
            deadline_secs: cfg.deadline_secs,
        });
        self.swap_profile("uniswap", venue, &cfg.trading, false)
    }

    fn swap_profile(
        &self,
        name: &str,
        venue: VenueSettings,
        trading: &TradingCfg,
        needs_payload: bool,
    ) -> Result<SwapProfile, ConfigError> {
        if trading.tokens.is_empty() {
            return Err(ConfigError::Invalid(format!("{}.tokens is empty", name)));
        }
        let native = self.native_currency();
        let tokens = trading
            .tokens
            .iter()
            .map(|t| token_descriptor(name, t, needs_payload))
            .collect::<Result<Vec<_>, _>>()?;
        for (i, token) in tokens.iter().enumerate() {
            if tokens[..i].iter().any(|t| t.symbol == token.symbol) {
                return Err(ConfigError::Invalid(format!(
                    "{}: duplicate token symbol {}",
                    name, token.symbol
                )));
            }
        }

        Ok(SwapProfile {
            name: name.to_string(),
            venue,
            min_native_swap: parse_human_amount(
                &format!("{}.min_native_swap", name),
                &trading.min_native_swap,
                native.decimals,
            )?,
            native,
            tokens,
            native_to_token: percent_range(
                &format!("{}.native_to_token_percent", name),
                &trading.native_to_token_percent,
            )?,
            token_to_native: percent_range(
                &format!("{}.token_to_native_percent", name),
                &trading.token_to_native_percent,
            )?,
            iterations: sample_range(&format!("{}.iterations", name), trading.iterations)?,
            delay_ms: sample_range(&format!("{}.delay_ms", name), trading.delay_ms)?,
            retry: self.retry_policy(trading.retry.as_ref())?,
            explorer_tx_url: self.rpc.explorer_tx_url.clone(),
        })
    }

    /// Validated staking run settings
    pub fn staking_profile(&self) -> Result<StakingProfile, ConfigError> {
        let cfg = self
            .staking
            .as_ref()
            .ok_or(ConfigError::MissingSection("staking"))?;
        let native = self.native_currency();
        let receipt_token = cfg
            .receipt_token
            .as_ref()
            .map(|t| -> Result<ReceiptToken, ConfigError> {
                Ok(ReceiptToken {
                    symbol: t.symbol.clone(),
                    address: parse_address("staking.receipt_token.address", &t.address)?,
                    decimals: t.decimals,
                })
            })
            .transpose()?;
        Ok(StakingProfile {
            contract: parse_address("staking.contract", &cfg.contract)?,
            selector: parse_selector(&cfg.selector)?,
            amount: parse_human_amount("staking.amount", &cfg.amount, native.decimals)?,
            receipt_token,
            native,
            retry: self.retry_policy(cfg.retry.as_ref())?,
            explorer_tx_url: self.rpc.explorer_tx_url.clone(),
        })
    }
}

fn parse_address(field: &str, value: &str) -> Result<Address, ConfigError> {
    Address::from_str(value.trim())
        .map_err(|e| ConfigError::InvalidAddress(field.to_string(), e.to_string()))
}

/// Decimal human amount ("0.01") to base units
fn parse_human_amount(field: &str, value: &str, decimals: u8) -> Result<U256, ConfigError> {
    let trimmed = value.trim();
    if trimmed.starts_with('-') {
        return Err(ConfigError::InvalidAmount(
            field.to_string(),
            format!("negative amount {}", trimmed),
        ));
    }
    parse_units(trimmed, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| ConfigError::InvalidAmount(field.to_string(), e.to_string()))
}

fn percent_range(field: &str, bounds: &[String; 2]) -> Result<PercentRange, ConfigError> {
    let min = percent_to_ppm(&bounds[0])
        .map_err(|e| ConfigError::InvalidRange(field.to_string(), e.to_string()))?;
    let max = percent_to_ppm(&bounds[1])
        .map_err(|e| ConfigError::InvalidRange(field.to_string(), e.to_string()))?;
    PercentRange::new(min, max).ok_or_else(|| {
        ConfigError::InvalidRange(
            field.to_string(),
            format!("min {} is above max {}", bounds[0], bounds[1]),
        )
    })
}

fn sample_range(field: &str, bounds: [u64; 2]) -> Result<SampleRange, ConfigError> {
    SampleRange::new(bounds[0], bounds[1]).ok_or_else(|| {
        ConfigError::InvalidRange(
            field.to_string(),
            format!("min {} is above max {}", bounds[0], bounds[1]),
        )
    })
}

fn parse_selector(value: &str) -> Result<[u8; 4], ConfigError> {
    let raw = value.trim().trim_start_matches("0x");
    let bytes = hex::decode(raw)
        .map_err(|e| ConfigError::Invalid(format!("staking.selector: {}", e)))?;
    <[u8; 4]>::try_from(bytes.as_slice()).map_err(|_| {
        ConfigError::Invalid(format!("staking.selector must be 4 bytes, got {}", bytes.len()))
    })
}

fn direction_constants(field: &str, cfg: &ConstantsCfg) -> Result<DirectionConstants, ConfigError> {
    let word = |value: &str| {
        Word::from_hex(value).map_err(|e| ConfigError::InvalidPayload(field.to_string(), e))
    };
    Ok(DirectionConstants {
        param5: word(&cfg.param5)?,
        param10: word(&cfg.param10)?,
        param11: word(&cfg.param11)?,
    })
}

fn token_descriptor(
    section: &str,
    cfg: &TokenCfg,
    needs_payload: bool,
) -> Result<TokenDescriptor, ConfigError> {
    let field = format!("{}.tokens.{}", section, cfg.symbol);
    let payload = match (&cfg.native_to_token, &cfg.token_to_native) {
        (Some(buy), Some(sell)) => Some(PayloadTemplate {
            native_to_token: direction_constants(&field, buy)?,
            token_to_native: direction_constants(&field, sell)?,
        }),
        (None, None) if !needs_payload => None,
        _ => {
            return Err(ConfigError::Invalid(format!(
                "{} needs both native_to_token and token_to_native constants",
                field
            )))
        }
    };
    Ok(TokenDescriptor {
        symbol: cfg.symbol.clone(),
        address: parse_address(&format!("{}.address", field), &cfg.address)?,
        decimals: cfg.decimals,
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::errors::EncodingError;

    const SAMPLE: &str = r#"
[rpc]
url = "https://testnet-rpc.monad.xyz"

[retry]
max_attempts = 3
delay_ms = 3000

[ambient]
swap_contract = "0x88B96aF200c8a9c35442C8AC6cd3D22695AaE4F0"
min_native_swap = "0.01"
native_to_token_percent = ["0.1", "0.3"]
token_to_native_percent = ["10", "79"]
iterations = [20, 30]
delay_ms = [5000, 10000]
retry = { max_attempts = 1, delay_ms = 0 }

[[ambient.tokens]]
symbol = "USDT"
address = "0x88b8E2161DEDC77EF4ab7585569D2415a1C1055D"
decimals = 6
native_to_token = { param5 = "8ca0", param10 = "ffff5433e2b3d8211706e6102aa9471", param11 = "18b37" }
token_to_native = { param5 = "8ca0", param10 = "10001", param11 = "0" }

[uniswap]
router = "0xfb8e1c3b833f9e67a71c859a132cf783b645e436"
wrapped_native = "0x760AfE86e5de5fa0Ee542fc7B7B713e1c5425701"
min_native_swap = "0.01"
native_to_token_percent = ["0.1", "0.3"]
token_to_native_percent = ["20", "88"]
iterations = [10, 15]
delay_ms = [2000, 5000]

[[uniswap.tokens]]
symbol = "CHOG"
address = "0xE0590015A873bF326bd645c3E1266d4db41C4E6B"
decimals = 18

[staking]
contract = "0x2c9C959516e9AAEdB2C748224a41249202ca8BE7"
receipt_token = { symbol = "gMON", address = "0xaEef2f6B429Cb59C9B2D7bB2141ADa993E8571c3" }
"#;

    #[test]
    fn test_ambient_profile_from_sample() {
        let cfg = Config::from_toml_str(SAMPLE).unwrap();
        let profile = cfg.ambient_profile().unwrap();
        assert_eq!(profile.native.symbol, "MON");
        assert_eq!(profile.min_native_swap, U256::from(10_000_000_000_000_000u64));
        assert_eq!(profile.native_to_token.min_ppm(), 1_000);
        assert_eq!(profile.native_to_token.max_ppm(), 3_000);
        assert_eq!(profile.token_to_native.max_ppm(), 790_000);
        assert_eq!(profile.iterations, SampleRange::new(20, 30).unwrap());
        assert_eq!(profile.retry, RetryPolicy::no_retry());

        let usdt = profile.token("USDT").unwrap();
        assert_eq!(usdt.decimals, 6);
        let template = usdt.payload.as_ref().unwrap();
        assert_eq!(template.native_to_token.param5, Word::from_u64(0x8ca0));
        assert_eq!(template.token_to_native.param11, Word::ZERO);
    }

    #[test]
    fn test_uniswap_profile_uses_defaults() {
        let cfg = Config::from_toml_str(SAMPLE).unwrap();
        let profile = cfg.uniswap_profile().unwrap();
        match &profile.venue {
            VenueSettings::UniswapV2(settings) => {
                assert_eq!(settings.slippage_bps, 900);
                assert_eq!(settings.deadline_secs, 1200);
            }
            other => panic!("unexpected venue {:?}", other),
        }
        assert_eq!(profile.retry.max_attempts, 3);
        assert_eq!(profile.retry.delay, Duration::from_millis(3000));
        assert_eq!(profile.token_to_native.min_ppm(), 200_000);
        assert!(profile.tokens[0].payload.is_none());
    }

    #[test]
    fn test_staking_profile_defaults() {
        let cfg = Config::from_toml_str(SAMPLE).unwrap();
        let staking = cfg.staking_profile().unwrap();
        assert_eq!(staking.selector, [0xd5, 0x57, 0x59, 0x82]);
        assert_eq!(staking.amount, U256::from(10_000_000_000_000_000u64));
        assert_eq!(staking.receipt_token.unwrap().symbol, "gMON");
        assert_eq!(cfg.wallet.private_key_path, "privatekey.txt");
        assert_eq!(cfg.sequence.stages, Stage::default_sequence());
    }

    #[test]
    fn test_inverted_percent_range_rejected() {
        let cfg = Config::from_toml_str(&SAMPLE.replace(r#"["10", "79"]"#, r#"["79", "10"]"#)).unwrap();
        assert!(matches!(cfg.ambient_profile(), Err(ConfigError::InvalidRange(..))));
        let cfg = Config::from_toml_str(&SAMPLE.replace(r#"["20", "88"]"#, r#"["20", "101"]"#)).unwrap();
        assert!(matches!(cfg.uniswap_profile(), Err(ConfigError::InvalidRange(..))));
    }

    #[test]
    fn test_oversized_constant_rejected() {
        let too_wide = "1".repeat(65);
        let cfg = Config::from_toml_str(&SAMPLE.replace("param10 = \"10001\"", &format!("param10 = \"{}\"", too_wide)))
            .unwrap();
        match cfg.ambient_profile() {
            Err(ConfigError::InvalidPayload(_, EncodingError::WordOverflow(_))) => {}
            other => panic!("unexpected result {:?}", other.map(|p| p.name)),
        }
    }

    #[test]
    fn test_missing_section_and_bad_address() {
        let cfg = Config::from_toml_str("[rpc]\nurl = \"http://localhost:8545\"\n").unwrap();
        assert!(matches!(cfg.staking_profile(), Err(ConfigError::MissingSection("staking"))));
        let cfg = Config::from_toml_str(&SAMPLE.replace("0x2c9C959516e9AAEdB2C748224a41249202ca8BE7", "0x2c9C")).unwrap();
        assert!(matches!(cfg.staking_profile(), Err(ConfigError::InvalidAddress(..))));
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let cfg = Config::from_toml_str(include_str!("../Config.toml")).unwrap();
        let ambient = cfg.ambient_profile().unwrap();
        assert_eq!(ambient.tokens.len(), 2);
        assert_eq!(ambient.retry.max_attempts, 1);
        let uniswap = cfg.uniswap_profile().unwrap();
        assert_eq!(uniswap.tokens.len(), 3);
        assert_eq!(uniswap.delay_ms, SampleRange::new(2000, 5000).unwrap());
        cfg.staking_profile().unwrap();
    }

    #[test]
    fn test_sequence_stages_parse() {
        let cfg = Config::from_toml_str(&format!("{}\n[sequence]\nstages = [\"stake\", \"ambient\"]\n", SAMPLE)).unwrap();
        assert_eq!(cfg.sequence.stages, vec![Stage::Stake, Stage::Ambient]);
    }
}
