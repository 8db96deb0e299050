//! Publishing boundary.
//!
//! The core hands a finished [`Document`] to a [`Publisher`] and treats the
//! call as opaque: one blocking request-response, no retries. Retry policy,
//! if any, belongs to the caller, not here.

use log::{debug, info};
use thiserror::Error;

use crate::{config::WorkspaceConfig, document::Document};

/// Error surfaced by a publisher.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("workspace {workspace_id} rejected with status {status}: {reason}")]
    Rejected {
        workspace_id: u64,
        status: u16,
        reason: String,
    },
}

/// Outbound contract for the remote documentation service.
///
/// Implementations receive the whole serialized model in one call; the model
/// is immutable by the time it reaches this boundary.
pub trait Publisher {
    /// Pushes `document` into the remote workspace.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError`] when the upload fails; the model core does
    /// not interpret the failure beyond surfacing it.
    fn publish(&self, workspace_id: u64, document: &Document) -> Result<(), PublishError>;
}

/// Publishes over HTTP with a single blocking `PUT` and no retries.
pub struct HttpPublisher {
    endpoint: String,
    api_key: String,
    api_secret: String,
    client: reqwest::blocking::Client,
}

impl HttpPublisher {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        HttpPublisher {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Builds a publisher from the injected workspace configuration.
    pub fn from_config(config: &WorkspaceConfig) -> Self {
        Self::new(&config.endpoint, &config.api_key, &config.api_secret)
    }

    fn workspace_url(&self, workspace_id: u64) -> String {
        format!(
            "{}/workspace/{workspace_id}",
            self.endpoint.trim_end_matches('/')
        )
    }
}

impl Publisher for HttpPublisher {
    fn publish(&self, workspace_id: u64, document: &Document) -> Result<(), PublishError> {
        let url = self.workspace_url(workspace_id);
        debug!(url; "Uploading workspace document");

        let response = self
            .client
            .put(&url)
            .header("X-Api-Key", &self.api_key)
            .header("X-Api-Secret", &self.api_secret)
            .json(document)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let reason = response.text().unwrap_or_default();
            return Err(PublishError::Rejected {
                workspace_id,
                status: status.as_u16(),
                reason,
            });
        }

        info!(workspace_id; "Workspace document accepted");
        Ok(())
    }
}
