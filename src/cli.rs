use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

use crate::auth::Token;
use crate::models::{BuildReport, Repository};
use crate::providers::github::{demo_report, GitHubProvider, DEMO_DATA_NOTICE};

#[derive(Parser)]
#[command(name = "ghdash")]
#[command(author, version, about = "GitHub Actions Build Health Tool", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output file path (defaults to stdout)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Pretty print JSON output
    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch workflow runs and report build health metrics
    Metrics {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// GitHub API token (optional, raises the rate limit)
        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,

        /// Restrict the report to runs of a single workflow id
        #[arg(short, long)]
        workflow: Option<u64>,
    },

    /// List the workflow definitions configured for a repository
    Workflows {
        /// Repository owner (user or organization)
        #[arg(long)]
        owner: String,

        /// Repository name
        #[arg(long)]
        repo: String,

        /// GitHub API token (optional, raises the rate limit)
        #[arg(short, long, env = "GITHUB_TOKEN")]
        token: Option<String>,
    },
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        match &self.command {
            Commands::Metrics {
                owner,
                repo,
                token,
                workflow,
            } => {
                let repository = Repository::new(owner, repo)?;
                info!("Collecting metrics for repository: {repository}");

                let has_token = token.is_some();
                let provider =
                    GitHubProvider::new(repository.clone(), token.as_deref().map(Token::from))?;

                let result = provider.collect_report(*workflow).await;
                let report = resolve_report(result, has_token, &repository)?;

                self.write_json(&report)
            }
            Commands::Workflows { owner, repo, token } => {
                let repository = Repository::new(owner, repo)?;
                info!("Listing workflows for repository: {repository}");

                let provider =
                    GitHubProvider::new(repository, token.as_deref().map(Token::from))?;
                let workflows = provider.list_workflows().await?;

                self.write_json(&workflows)
            }
        }
    }

    fn write_json<T: serde::Serialize>(&self, value: &T) -> Result<()> {
        let json_output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, json_output)?;
            info!("Report written to: {}", output_path.display());
        } else {
            println!("{json_output}");
        }

        Ok(())
    }
}

/// Fallback policy for a failed refresh: without a token the demo
/// dataset stands in; with one the error is surfaced as-is.
fn resolve_report(
    result: crate::error::Result<BuildReport>,
    has_token: bool,
    repository: &Repository,
) -> Result<BuildReport> {
    match result {
        Ok(report) => Ok(report),
        Err(err) if !has_token => {
            warn!("Fetch failed, falling back to demo data: {err}");
            Ok(demo_report(repository, DEMO_DATA_NOTICE))
        }
        Err(err) => Err(err.into()),
    }
}
