use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use monad_autoswap::app;
use monad_autoswap::application::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    app::run(cli).await
}
