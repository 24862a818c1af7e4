//! Sequential stage runner: each stage is a child process of this binary

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use tokio::process::Command;
use tracing::{error, info};

use crate::shared::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Ambient,
    Uniswap,
    Stake,
}

impl Stage {
    /// Subcommand that runs this stage
    pub fn subcommand(&self) -> &'static str {
        match self {
            Stage::Ambient => "ambient",
            Stage::Uniswap => "uniswap",
            Stage::Stake => "stake",
        }
    }

    pub fn default_sequence() -> Vec<Stage> {
        vec![Stage::Ambient, Stage::Uniswap, Stage::Stake]
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.subcommand())
    }
}

impl FromStr for Stage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ambient" => Ok(Stage::Ambient),
            "uniswap" | "uniswap_v2" => Ok(Stage::Uniswap),
            "stake" | "staking" => Ok(Stage::Stake),
            _ => Err(anyhow::anyhow!("Unknown stage: {}", s)),
        }
    }
}

/// Runs stages one after another and stops at the first failure
pub struct SequenceRunner {
    program: PathBuf,
    /// Global flags passed to every stage before its subcommand
    forwarded_args: Vec<String>,
}

impl SequenceRunner {
    pub fn new(program: impl Into<PathBuf>, forwarded_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            forwarded_args,
        }
    }

    /// Runner that re-invokes the currently running executable
    pub fn for_current_exe(forwarded_args: Vec<String>) -> anyhow::Result<Self> {
        let program = std::env::current_exe()?;
        Ok(Self::new(program, forwarded_args))
    }

    pub async fn run(&self, stages: &[Stage]) -> Result<(), AppError> {
        for (index, stage) in stages.iter().enumerate() {
            info!("Stage {}/{}: {}", index + 1, stages.len(), stage);
            if let Err(e) = self.run_stage(*stage).await {
                error!("{}; remaining stages skipped", e);
                return Err(e);
            }
            info!("Stage {} completed", stage);
        }
        info!("All {} stages completed", stages.len());
        Ok(())
    }

    async fn run_stage(&self, stage: Stage) -> Result<(), AppError> {
        let status = Command::new(&self.program)
            .args(&self.forwarded_args)
            .arg(stage.subcommand())
            .status()
            .await
            .map_err(|e| {
                AppError::Stage(
                    stage.to_string(),
                    format!("failed to launch {}: {}", self.program.display(), e),
                )
            })?;
        if !status.success() {
            let reason = match status.code() {
                Some(code) => format!("exited with code {}", code),
                None => "terminated by signal".to_string(),
            };
            return Err(AppError::Stage(stage.to_string(), reason));
        }
        Ok(())
    }
}
