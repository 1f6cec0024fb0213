//! GitHub REST client
//!
//! Pages through an organization's repositories. Every API-level stop
//! condition is folded into `FetchHalt` with the repositories gathered so
//! far, so a rate limit on page 3 still yields two pages of results.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};

#[cfg(test)]
use mockall::automock;

use crate::error::GithubError;
use crate::models::Repository;

const USER_AGENT: &str = "crewflow/1.0";
const ACCEPT: &str = "application/vnd.github.v3+json";
const PER_PAGE: usize = 100;
const PAGE_DELAY: Duration = Duration::from_millis(1000);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Why fetching stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchHalt {
    /// The last page was reached
    Completed,
    /// HTTP 404: the organization does not exist
    OrgNotFound,
    /// HTTP 403: rate limit exceeded or token invalid
    Forbidden,
    /// Any other non-success status
    Failed(u16),
}

/// Repositories gathered before fetching stopped
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub repositories: Vec<Repository>,
    pub halt: FetchHalt,
}

/// Source of organization repositories
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetch an organization's repositories, most recently updated first.
    ///
    /// API-level halts are reported in the outcome together with the
    /// partial results; only transport failures surface as `Err`.
    async fn org_repositories(&self, organization: &str) -> Result<FetchOutcome, GithubError>;
}

/// `RepoSource` over the GitHub REST API
pub struct GithubClient {
    client: Client,
    api_url: String,
    token: Option<String>,
}

impl GithubClient {
    /// Unauthenticated requests work but are rate-limited to 60/hour.
    pub fn new(api_url: impl Into<String>, token: Option<String>) -> Result<Self, GithubError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_url: api_url.into(),
            token,
        })
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn org_repositories(&self, organization: &str) -> Result<FetchOutcome, GithubError> {
        let mut repositories: Vec<Repository> = Vec::new();
        let mut page = 1u32;

        loop {
            let url = format!(
                "{}/orgs/{}/repos?per_page={}&page={}&sort=updated&direction=desc",
                self.api_url, organization, PER_PAGE, page
            );
            tracing::info!(page, "fetching repository page");

            let mut request = self
                .client
                .get(&url)
                .header(header::USER_AGENT, USER_AGENT)
                .header(header::ACCEPT, ACCEPT);
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }

            let response = request.send().await?;
            let status = response.status();

            if status.is_success() {
                let batch: Vec<Repository> = response.json().await?;
                let last_page = batch.len() < PER_PAGE;
                tracing::info!(page, count = batch.len(), "fetched repository page");
                repositories.extend(batch);
                if last_page {
                    tracing::info!(total = repositories.len(), "repository fetch complete");
                    return Ok(FetchOutcome {
                        repositories,
                        halt: FetchHalt::Completed,
                    });
                }
                page += 1;
                tokio::time::sleep(PAGE_DELAY).await;
            } else if status == StatusCode::NOT_FOUND {
                tracing::warn!(organization, "organization not found");
                return Ok(FetchOutcome {
                    repositories,
                    halt: FetchHalt::OrgNotFound,
                });
            } else if status == StatusCode::FORBIDDEN {
                let remaining = response
                    .headers()
                    .get("x-ratelimit-remaining")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("unknown");
                tracing::error!(
                    rate_limit_remaining = remaining,
                    "access forbidden; rate limit exceeded or token invalid"
                );
                return Ok(FetchOutcome {
                    repositories,
                    halt: FetchHalt::Forbidden,
                });
            } else {
                let body = response.text().await.unwrap_or_default();
                tracing::error!(status = %status, body = %body, "repository page fetch failed");
                return Ok(FetchOutcome {
                    repositories,
                    halt: FetchHalt::Failed(status.as_u16()),
                });
            }
        }
    }
}
