// src/app.rs
use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

use crate::application::commands::{Cli, Commands};
use crate::application::sequence::SequenceRunner;
use crate::application::staking::StakingRunner;
use crate::application::swap_bot::SwapBot;
use crate::config::Config;
use crate::domain::payload::parse_amount;
use crate::exchanges::ambient::AmbientVenue;
use crate::exchanges::types::VenueSettings;
use crate::infrastructure::blockchain::{load_signer, AlloyChainClient};
use crate::shared::errors::{AppError, ConfigError};
use crate::shared::types::SwapProfile;

/// Config file values with CLI overrides applied (CLI wins)
#[derive(Debug, Clone)]
pub struct AppCfg {
    pub config: Config,
    pub rpc_url: String,
    pub key_file: PathBuf,
    pub report_path: Option<PathBuf>,
}

impl AppCfg {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::from_file(&cli.config)
            .with_context(|| format!("load {}", cli.config.display()))?;
        Ok(Self::with_overrides(config, cli))
    }

    pub fn with_overrides(config: Config, cli: &Cli) -> Self {
        Self {
            rpc_url: cli.rpc_url.clone().unwrap_or_else(|| config.rpc.url.clone()),
            key_file: cli
                .key_file
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.wallet.private_key_path)),
            report_path: cli.report.clone(),
            config,
        }
    }

    /// Load the wallet and check the node answers before anything is sent
    pub async fn connect(&self) -> Result<AlloyChainClient, AppError> {
        let signer = load_signer(&self.key_file)?;
        let client = AlloyChainClient::connect(&self.rpc_url, signer)?;
        let chain_id = client.chain_id().await?;
        info!("Connected to {} (chain id {})", self.rpc_url, chain_id);
        Ok(client)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = AppCfg::from_cli(&cli)?;

    match &cli.command {
        Commands::Ambient => run_swaps(&cfg, cfg.config.ambient_profile()?).await,
        Commands::Uniswap => run_swaps(&cfg, cfg.config.uniswap_profile()?).await,
        Commands::Stake => {
            let profile = cfg.config.staking_profile()?;
            let client = cfg.connect().await?;
            StakingRunner::new(&profile, &client).run().await?;
            Ok(())
        }
        Commands::Sequence { stages } => {
            let stages = if stages.is_empty() {
                cfg.config.sequence.stages.clone()
            } else {
                stages.clone()
            };
            let runner = SequenceRunner::for_current_exe(cli.forwarded_args())?;
            runner.run(&stages).await?;
            Ok(())
        }
        Commands::Payload {
            token,
            amount,
            direction,
        } => {
            let profile = cfg.config.ambient_profile()?;
            let payload = ambient_payload(&profile, token, amount, *direction)?;
            println!("{}", payload.0);
            println!("{}", payload.1);
            Ok(())
        }
    }
}

async fn run_swaps(cfg: &AppCfg, profile: SwapProfile) -> Result<()> {
    let client = cfg.connect().await?;
    let bot = SwapBot::new(&profile, &client);
    let mut rng = StdRng::from_entropy();
    let report = bot.run(&mut rng).await;
    if let Some(path) = &cfg.report_path {
        report.write_json(path)?;
    }
    Ok(())
}

/// Argument block and full calldata, both 0x-prefixed hex
fn ambient_payload(
    profile: &SwapProfile,
    symbol: &str,
    amount: &str,
    direction: crate::shared::types::Direction,
) -> Result<(String, String), AppError> {
    let VenueSettings::Ambient(settings) = &profile.venue else {
        return Err(ConfigError::Invalid("ambient profile without ambient venue".to_string()).into());
    };
    let token = profile
        .token(symbol)
        .ok_or_else(|| ConfigError::Invalid(format!("unknown token {}", symbol)))?;
    let amount = parse_amount(amount)?;
    let venue = AmbientVenue::new(settings.clone());
    let payload = venue.build_payload(direction, token, amount)?;
    Ok((
        payload.to_hex(),
        format!("0x{}", hex::encode(payload.calldata())),
    ))
}
