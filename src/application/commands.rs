//! CLI commands
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::application::sequence::Stage;
use crate::shared::types::Direction;

#[derive(Parser, Debug)]
#[command(name = "autoswap")]
#[command(version, about = "Monad testnet swap and staking automation")]
pub struct Cli {
    /// Path to config file
    #[arg(long, global = true, default_value = "Config.toml")]
    pub config: PathBuf,

    /// RPC endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Path to private key file (overrides config)
    #[arg(long, global = true)]
    pub key_file: Option<PathBuf>,

    /// Write the run report as JSON to this path
    #[arg(long, global = true)]
    pub report: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Random MON/token swaps through the Ambient DEX
    Ambient,

    /// Random MON/token swaps through the Uniswap V2 router
    Uniswap,

    /// Stake MON once and report balances
    Stake,

    /// Run stages one after another as child processes
    Sequence {
        /// Stages to run (defaults to the [sequence] config section)
        #[arg(value_delimiter = ',')]
        stages: Vec<Stage>,
    },

    /// Print the Ambient userCmd payload for a token and amount
    Payload {
        /// Token symbol from the [ambient] section
        #[arg(short, long)]
        token: String,

        /// Amount in base units
        #[arg(short, long)]
        amount: String,

        /// native-to-token (buy) or token-to-native (sell)
        #[arg(short, long, default_value = "native-to-token")]
        direction: Direction,
    },
}

impl Cli {
    /// Global flags to hand to a child stage so it sees the same configuration
    pub fn forwarded_args(&self) -> Vec<String> {
        let mut args = vec!["--config".to_string(), self.config.display().to_string()];
        if let Some(url) = &self.rpc_url {
            args.push("--rpc-url".to_string());
            args.push(url.clone());
        }
        if let Some(key_file) = &self.key_file {
            args.push("--key-file".to_string());
            args.push(key_file.display().to_string());
        }
        args
    }
}
