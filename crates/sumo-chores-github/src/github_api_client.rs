use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::github_transport_helpers::{
    error_body_excerpt, is_transient_status, is_transient_transport_error, retry_after_hint,
    RetryPolicy, ERROR_BODY_EXCERPT_CHARS,
};
use crate::issue_filter::labels_query_value;
use crate::repo_ref::RepoRef;

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";
const ISSUES_PAGE_SIZE: usize = 100;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GithubIssue {
    pub number: u64,
    pub title: String,
    pub html_url: String,
    /// Present when the "issue" is really a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl GithubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GithubRepository {
    pub full_name: String,
}

fn github_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("sumo-chores"));
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );
    headers.insert(
        "x-github-api-version",
        HeaderValue::from_static(GITHUB_API_VERSION),
    );
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
        .context("github token is not a valid header value")?;
    bearer.set_sensitive(true);
    headers.insert(AUTHORIZATION, bearer);
    Ok(headers)
}

/// Issue-tracker client scoped to one repository.
#[derive(Clone)]
pub struct GithubApiClient {
    http: reqwest::Client,
    api_base: String,
    repo: RepoRef,
    retry: RetryPolicy,
}

impl GithubApiClient {
    pub fn new(
        api_base: String,
        token: String,
        repo: RepoRef,
        request_timeout_ms: u64,
        retry_max_attempts: usize,
        retry_base_delay_ms: u64,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .default_headers(github_headers(&token)?)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .context("failed to build github http client")?;
        Ok(Self {
            http,
            api_base: api_base.trim().trim_end_matches('/').to_string(),
            repo,
            retry: RetryPolicy::new(retry_max_attempts, retry_base_delay_ms),
        })
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }

    fn repo_url(&self, tail: &str) -> String {
        format!("{}/repos/{}{tail}", self.api_base, self.repo.as_slug())
    }

    pub async fn get_repository(&self) -> Result<GithubRepository> {
        let url = self.repo_url("");
        self.send_json("get repository", self.retry, || self.http.get(&url))
            .await
    }

    /// Open issues carrying every label in `labels`, pull requests excluded.
    pub async fn list_open_issues_with_labels(&self, labels: &[&str]) -> Result<Vec<GithubIssue>> {
        let url = self.repo_url("/issues");
        let labels = labels_query_value(labels);
        let mut issues = Vec::new();
        for page in 1_usize.. {
            let query = [
                ("state", "open".to_string()),
                ("labels", labels.clone()),
                ("per_page", ISSUES_PAGE_SIZE.to_string()),
                ("page", page.to_string()),
            ];
            let batch: Vec<GithubIssue> = self
                .send_json("list issues", self.retry, || self.http.get(&url).query(&query))
                .await?;
            let last_page = batch.len() < ISSUES_PAGE_SIZE;
            issues.extend(batch.into_iter().filter(|issue| !issue.is_pull_request()));
            if last_page {
                break;
            }
        }
        Ok(issues)
    }

    /// Issue creation is attempted once; a retried write could file a duplicate.
    pub async fn create_issue(&self, title: &str, body: &str, labels: &[&str]) -> Result<GithubIssue> {
        let url = self.repo_url("/issues");
        let payload = json!({ "title": title, "body": body, "labels": labels });
        self.send_json("create issue", self.retry.single_attempt(), || {
            self.http.post(&url).json(&payload)
        })
        .await
    }

    async fn send_json<T, F>(&self, operation: &str, policy: RetryPolicy, build: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: Fn() -> RequestBuilder,
    {
        let mut attempt = 1_usize;
        loop {
            let retry_after = match build().send().await {
                Ok(response) if response.status().is_success() => {
                    return response
                        .json::<T>()
                        .await
                        .with_context(|| format!("failed to decode github {operation} response"));
                }
                Ok(response) => {
                    let status = response.status();
                    let retry_after = retry_after_hint(response.headers());
                    let body = response.text().await.unwrap_or_default();
                    if !(policy.has_attempts_left(attempt) && is_transient_status(status.as_u16()))
                    {
                        return Err(status_error(operation, status, &body));
                    }
                    tracing::debug!(
                        operation,
                        status = status.as_u16(),
                        attempt,
                        "retrying github request"
                    );
                    retry_after
                }
                Err(error) => {
                    if !(policy.has_attempts_left(attempt) && is_transient_transport_error(&error))
                    {
                        return Err(error)
                            .with_context(|| format!("github {operation} request failed"));
                    }
                    tracing::debug!(
                        operation,
                        attempt,
                        "retrying github request after transport error"
                    );
                    None
                }
            };
            tokio::time::sleep(policy.backoff(attempt, retry_after)).await;
            attempt += 1;
        }
    }
}

fn status_error(operation: &str, status: StatusCode, body: &str) -> anyhow::Error {
    anyhow!(
        "github api {operation} failed with status {}: {}",
        status.as_u16(),
        error_body_excerpt(body, ERROR_BODY_EXCERPT_CHARS)
    )
}
