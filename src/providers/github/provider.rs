use chrono::Utc;
use log::{info, warn};

use crate::auth::Token;
use crate::error::Result;
use crate::models::{BuildReport, Repository, Workflow};
use crate::providers::github::client::GitHubClient;
use crate::providers::github::demo;
use crate::providers::github::metrics::calculate_metrics;
use crate::report;

pub struct GitHubProvider {
    pub client: GitHubClient,
    pub repository: Repository,
}

impl GitHubProvider {
    pub fn new(repository: Repository, token: Option<Token>) -> Result<Self> {
        let client = GitHubClient::new(token)?;

        Ok(Self { client, repository })
    }

    /// Fetch one page of runs and reduce it into a full report.
    pub async fn collect_report(&self, workflow_id: Option<u64>) -> Result<BuildReport> {
        info!("Collecting build metrics for {}", self.repository);

        let runs = match workflow_id {
            Some(id) => {
                self.client
                    .fetch_workflow_runs_for(&self.repository, id)
                    .await?
            }
            None => self.client.fetch_workflow_runs(&self.repository).await?,
        };

        if runs.is_empty() {
            warn!("No workflow runs found for {}", self.repository);
        }

        let now = Utc::now();
        let metrics = calculate_metrics(&runs);

        Ok(BuildReport {
            repository: self.repository.to_string(),
            collected_at: now,
            data_source: "live".to_string(),
            note: None,
            status_distribution: report::status_distribution(&metrics),
            build_trends: report::build_trends(&runs),
            recent_builds: report::recent_builds(&runs, now),
            metrics,
        })
    }

    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        info!("Listing workflows for {}", self.repository);

        self.client.fetch_workflows(&self.repository).await
    }
}

/// Report built from the canned dataset, used when a fetch fails and no
/// token is configured.
pub fn demo_report(repository: &Repository, note: &str) -> BuildReport {
    let now = Utc::now();
    let runs = demo::demo_workflow_runs(now);
    let metrics = demo::demo_metrics();

    BuildReport {
        repository: repository.to_string(),
        collected_at: now,
        data_source: "demo".to_string(),
        note: Some(note.to_string()),
        status_distribution: report::status_distribution(&metrics),
        build_trends: report::build_trends(&runs),
        recent_builds: report::recent_builds(&runs, now),
        metrics,
    }
}
