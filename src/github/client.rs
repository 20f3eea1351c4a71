use anyhow::{Context, Result};
use tracing::debug;

use crate::github::fetch::{IssueQuery, IssueSource};
use crate::github::issues::Issue;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const PER_PAGE: u32 = 100;
const USER_AGENT: &str = "doxy-issues";

/// Issue listing over the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(api_url: &str, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(GitHubClient {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn issues_url(&self, query: &IssueQuery) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url, query.owner, query.repo
        )
    }
}

impl IssueSource for GitHubClient {
    async fn list_issues(&self, query: &IssueQuery, page: u32) -> Result<Vec<Issue>> {
        let url = self.issues_url(query);
        debug!(%url, page, "requesting issues");

        let mut params = vec![
            ("state", query.state.as_str().to_string()),
            ("page", page.to_string()),
            ("per_page", PER_PAGE.to_string()),
        ];
        if !query.labels.is_empty() {
            params.push(("labels", query.labels.clone()));
        }

        let mut request = self
            .http
            .get(&url)
            .query(&params)
            .header("Accept", "application/vnd.github+json")
            .header("User-Agent", USER_AGENT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Failed to request page {page} from {url}"))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(anyhow::anyhow!(
                "Token invalid or expired. Check --token or GITHUB_TOKEN."
            ));
        }
        if !status.is_success() {
            return Err(anyhow::anyhow!("API request error: {status}"));
        }

        response
            .json::<Vec<Issue>>()
            .await
            .with_context(|| format!("Failed to parse issues page {page}"))
    }
}
