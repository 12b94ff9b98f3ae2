//! Jira vendor implementation
//!
//! Talks to the Jira Agile REST API: board sprints and sprint issues. Errors
//! are mapped onto [`TrackerError`] so no HTTP client types leak out.

use super::models::{IssueListResponse, SprintListResponse};
use super::traits::TrackerVendor;
use crate::config::TrackerConfig;
use crate::domain::ids::{BoardId, SprintId};
use crate::domain::issue::{Issue, Sprint};
use crate::domain::{Result, TrackerError};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// Jira vendor implementation
pub struct JiraVendor {
    base_url: String,
    client: Client,
    config: TrackerConfig,
}

impl JiraVendor {
    /// Create a new Jira vendor instance
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TrackerError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            base_url,
            client,
            config,
        })
    }

    /// Build the basic-auth header value, if credentials are configured
    fn auth_header_value(&self) -> Option<String> {
        match (&self.config.username, &self.config.api_token) {
            (Some(username), Some(token)) => {
                let credentials = format!("{username}:{}", token.expose_secret());
                let encoded = general_purpose::STANDARD.encode(credentials.as_bytes());
                Some(format!("Basic {encoded}"))
            }
            _ => None,
        }
    }

    /// Execute a GET request and decode the JSON response
    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(auth) = self.auth_header_value() {
            request = request.header("Authorization", auth);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                TrackerError::Timeout(e.to_string())
            } else {
                TrackerError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status();
        match status {
            StatusCode::OK => response
                .json::<T>()
                .await
                .map_err(|e| TrackerError::InvalidResponse(e.to_string()).into()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(TrackerError::AuthenticationFailed(format!("HTTP {status}")).into())
            }
            StatusCode::NOT_FOUND => {
                Err(TrackerError::ClientError {
                    status: status.as_u16(),
                    message: format!("{url} not found"),
                }
                .into())
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown")
                    .to_string();
                Err(TrackerError::RateLimitExceeded(retry_after).into())
            }
            status if status.is_server_error() => Err(TrackerError::ServerError {
                status: status.as_u16(),
                message: status.to_string(),
            }
            .into()),
            status => Err(TrackerError::ClientError {
                status: status.as_u16(),
                message: status.to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl TrackerVendor for JiraVendor {
    async fn fetch_sprints(&self, board_id: &BoardId) -> Result<Vec<Sprint>> {
        let url = format!(
            "{}/rest/agile/1.0/board/{}/sprint",
            self.base_url,
            board_id.as_str()
        );
        tracing::debug!(url = %url, "Fetching sprints for board");

        let response: SprintListResponse = self.get_json(&url).await?;
        let mut sprints = Vec::with_capacity(response.values.len());
        for wire in response.values {
            sprints.push(wire.into_domain()?);
        }

        tracing::info!(
            board_id = %board_id,
            count = sprints.len(),
            "Fetched sprints from tracker"
        );
        Ok(sprints)
    }

    async fn fetch_sprint_issues(&self, sprint_id: &SprintId) -> Result<Vec<Issue>> {
        let url = format!(
            "{}/rest/agile/1.0/sprint/{}/issue",
            self.base_url,
            sprint_id.as_str()
        );
        tracing::debug!(url = %url, "Fetching issues for sprint");

        let response: IssueListResponse = self.get_json(&url).await?;
        let mut issues = Vec::with_capacity(response.issues.len());
        for wire in response.issues {
            // A malformed issue skips, it doesn't sink the whole fetch
            match wire.into_domain() {
                Ok(issue) => issues.push(issue),
                Err(e) => {
                    tracing::warn!(error = %e, "Skipping malformed issue in tracker response");
                }
            }
        }

        tracing::info!(
            sprint_id = %sprint_id,
            count = issues.len(),
            "Fetched issues from tracker"
        );
        Ok(issues)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
