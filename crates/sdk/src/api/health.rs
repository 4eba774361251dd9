//! Connectivity check.

use crate::client::TodoistClient;
use tracing::{debug, error};

/// Health API for verifying the credential and connectivity.
pub struct HealthApi<'a> {
    client: &'a TodoistClient,
}

impl<'a> HealthApi<'a> {
    pub(crate) fn new(client: &'a TodoistClient) -> Self {
        Self { client }
    }

    /// Issue a project listing and report whether it succeeded.
    ///
    /// Failures are logged and never propagated.
    pub async fn check(&self) -> bool {
        match self.client.projects().list().await {
            Ok(projects) => {
                debug!(projects = projects.len(), "Health check passed");
                true
            }
            Err(e) => {
                error!(kind = ?e.kind(), "Health check failed: {}", e);
                false
            }
        }
    }
}
