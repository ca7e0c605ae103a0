use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{GhDashError, Result};

/// Owner/name pair identifying the repository under analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub owner: String,
    pub repo: String,
}

impl Repository {
    pub fn new(owner: &str, repo: &str) -> Result<Self> {
        if owner.is_empty() || repo.is_empty() {
            return Err(GhDashError::Config(
                "Repository owner and name must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            owner: owner.to_owned(),
            repo: repo.to_owned(),
        })
    }
}

impl std::fmt::Display for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// One historical workflow execution, as returned by the GitHub REST API.
///
/// `status` is an open set; only "completed" and "in_progress" are
/// interpreted. `conclusion` is null until the run has concluded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowRun {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub run_started_at: Option<DateTime<Utc>>,
    pub workflow_id: u64,
    pub head_branch: String,
    pub head_sha: String,
}

/// A workflow definition from the /actions/workflows endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    pub id: u64,
    pub name: String,
    pub state: String,
    pub path: String,
}

/// Derived build-health snapshot, fully recomputed on every refresh.
///
/// Rates are stored at full precision; only the duration average is
/// rounded (to 2 decimal places).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitHubMetrics {
    pub build_success_rate: f64,
    pub average_build_duration: f64,
    pub failed_builds: usize,
    pub test_pass_rate: f64,
    pub total_builds: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BuildReport {
    pub repository: String,
    pub collected_at: DateTime<Utc>,
    pub data_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub metrics: GitHubMetrics,
    pub status_distribution: StatusDistribution,
    pub build_trends: Vec<TrendPoint>,
    pub recent_builds: Vec<RecentBuild>,
}

/// Display row for the recent-builds list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentBuild {
    pub id: u64,
    pub name: String,
    pub status: String,
    pub branch: String,
    pub commit: String,
    pub age: String,
    pub duration: Option<String>,
}

/// Per-day outcome counts for the build trends series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub successful: usize,
    pub failed: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusDistribution {
    pub success: usize,
    pub failed: usize,
    pub cancelled: usize,
}
