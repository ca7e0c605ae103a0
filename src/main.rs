mod auth;
mod cli;
mod error;
mod models;
mod providers;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting ghdash - GitHub Actions Build Health Tool");
    cli.execute().await?;

    Ok(())
}
