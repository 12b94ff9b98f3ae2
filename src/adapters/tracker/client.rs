//! Tracker client factory and utilities
//!
//! This module provides a factory for creating tracker vendor instances and
//! a high-level client that wraps one.

use crate::config::TrackerConfig;
use crate::domain::ids::BoardId;
use crate::domain::{Result, SprintdeckError};
use std::str::FromStr;
use std::sync::Arc;

use super::jira::JiraVendor;
use super::traits::TrackerVendor;

/// Tracker client that wraps a vendor implementation
///
/// This struct provides a high-level interface for interacting with the
/// issue tracker. It handles vendor selection and provides common utilities
/// like health checks.
pub struct TrackerClient {
    vendor: Arc<dyn TrackerVendor>,
    board_id: Option<BoardId>,
}

impl TrackerClient {
    /// Create a new tracker client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the vendor type is not supported or the vendor
    /// cannot be initialized.
    pub fn new(config: TrackerConfig) -> Result<Self> {
        let vendor_type = config.vendor_type.to_lowercase();
        let board_id = config
            .board_id
            .as_deref()
            .map(BoardId::from_str)
            .transpose()
            .map_err(SprintdeckError::Configuration)?;

        let vendor: Arc<dyn TrackerVendor> = match vendor_type.as_str() {
            "jira" => Arc::new(JiraVendor::new(config)?),
            _ => {
                return Err(SprintdeckError::Configuration(format!(
                    "Unsupported tracker vendor: {vendor_type}. Supported vendors: jira"
                )))
            }
        };

        Ok(Self { vendor, board_id })
    }

    /// Get a reference to the underlying vendor implementation
    pub fn vendor(&self) -> &Arc<dyn TrackerVendor> {
        &self.vendor
    }

    /// The configured board, if any
    pub fn board_id(&self) -> Option<&BoardId> {
        self.board_id.as_ref()
    }

    /// Perform a health check against the tracker
    ///
    /// Fetches the configured board's sprints as a connectivity and
    /// authentication probe.
    ///
    /// # Errors
    ///
    /// Returns an error if no board is configured or the probe fails.
    pub async fn health_check(&self) -> Result<()> {
        let board_id = self.board_id.as_ref().ok_or_else(|| {
            SprintdeckError::Configuration(
                "tracker.board_id is required for a health check".to_string(),
            )
        })?;

        match self.vendor.fetch_sprints(board_id).await {
            Ok(_) => {
                tracing::info!(
                    base_url = self.vendor.base_url(),
                    "Tracker health check passed"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    base_url = self.vendor.base_url(),
                    error = %e,
                    "Tracker health check failed"
                );
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(vendor_type: &str) -> TrackerConfig {
        TrackerConfig {
            base_url: "https://jira.example.com".to_string(),
            vendor_type: vendor_type.to_string(),
            username: None,
            api_token: None,
            board_id: Some("42".to_string()),
            timeout_seconds: 5,
        }
    }

    #[test]
    fn test_client_creation_with_jira() {
        let client = TrackerClient::new(config("jira")).unwrap();
        assert_eq!(client.board_id().unwrap().as_str(), "42");
        assert_eq!(client.vendor().base_url(), "https://jira.example.com");
    }

    #[test]
    fn test_client_creation_with_unsupported_vendor() {
        let result = TrackerClient::new(config("linear"));
        assert!(result.is_err());

        if let Err(SprintdeckError::Configuration(msg)) = result {
            assert!(msg.contains("Unsupported tracker vendor"));
        } else {
            panic!("Expected Configuration error");
        }
    }

    #[tokio::test]
    async fn test_health_check_without_board() {
        let mut cfg = config("jira");
        cfg.board_id = None;
        let client = TrackerClient::new(cfg).unwrap();
        assert!(client.health_check().await.is_err());
    }
}
