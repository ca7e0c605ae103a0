use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::auth::Token;
use crate::error::{GhDashError, Result};
use crate::models::{Repository, Workflow, WorkflowRun};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";

// One page is fetched per refresh; no follow-up pages.
const PER_PAGE: u32 = 100;

pub struct GitHubClient {
    client: Client,
    api_url: Url,
    token: Option<Token>,
}

#[derive(Debug, Deserialize)]
struct WorkflowRunsPage {
    #[serde(default)]
    workflow_runs: Vec<WorkflowRun>,
}

#[derive(Debug, Deserialize)]
struct WorkflowsPage {
    #[serde(default)]
    workflows: Vec<Workflow>,
}

impl GitHubClient {
    pub fn new(token: Option<Token>) -> Result<Self> {
        Self::with_base_url(DEFAULT_API_BASE, token)
    }

    pub fn with_base_url(base_url: &str, token: Option<Token>) -> Result<Self> {
        let client = Client::builder()
            .user_agent("ghdash/0.1.0")
            .build()
            .map_err(|e| GhDashError::Config(format!("Failed to create HTTP client: {e}")))?;

        let api_url = Url::parse(base_url)
            .map_err(|e| GhDashError::Config(format!("Invalid API base URL: {e}")))?;

        Ok(Self {
            client,
            api_url,
            token,
        })
    }

    /// Helper to build authenticated requests
    fn auth_request(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = &self.token {
            request.bearer_auth(token.as_str())
        } else {
            request
        }
    }

    /// Construct an actions resource URL for the repository
    fn actions_url(&self, repo: &Repository, resource: &str) -> Result<Url> {
        self.api_url
            .join(&format!(
                "repos/{}/{}/actions/{resource}",
                repo.owner, repo.repo
            ))
            .map_err(|e| GhDashError::Config(format!("Invalid request URL: {e}")))
    }

    /// Fetch one page of workflow runs for the repository
    pub async fn fetch_workflow_runs(&self, repo: &Repository) -> Result<Vec<WorkflowRun>> {
        let url = self.actions_url(repo, "runs")?;
        let page: WorkflowRunsPage = self.get_json(url).await?;
        Ok(page.workflow_runs)
    }

    /// Fetch one page of runs scoped to a single workflow
    pub async fn fetch_workflow_runs_for(
        &self,
        repo: &Repository,
        workflow_id: u64,
    ) -> Result<Vec<WorkflowRun>> {
        let url = self.actions_url(repo, &format!("workflows/{workflow_id}/runs"))?;
        let page: WorkflowRunsPage = self.get_json(url).await?;
        Ok(page.workflow_runs)
    }

    /// Fetch the workflow definitions for the repository
    pub async fn fetch_workflows(&self, repo: &Repository) -> Result<Vec<Workflow>> {
        let url = self.actions_url(repo, "workflows")?;
        let page: WorkflowsPage = self.get_json(url).await?;
        Ok(page.workflows)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let request = self
            .client
            .get(url)
            .header("Accept", ACCEPT_HEADER)
            .query(&[("per_page", PER_PAGE)]);

        let response = self.auth_request(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GhDashError::Upstream {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        Ok(response.json::<T>().await?)
    }
}
