//! Activity delivery
//!
//! Sends activities to remote endpoints. Delivery is synchronous and
//! unretried; the federation protocol's own retry semantics at the
//! sender are relied upon instead of a durable local queue.

use std::sync::Arc;

use crate::error::AppError;

/// Outbound activity delivery service
#[derive(Clone)]
pub struct ActivityDelivery {
    http_client: Arc<reqwest::Client>,
}

impl ActivityDelivery {
    /// Create new delivery service
    ///
    /// The client carries the delivery timeout configured at startup.
    pub fn new(http_client: Arc<reqwest::Client>) -> Self {
        Self { http_client }
    }

    /// Deliver an activity to a single remote endpoint.
    ///
    /// The remote must answer exactly HTTP 200 for the delivery to
    /// count as accepted.
    ///
    /// # Errors
    /// `Delivery` on a malformed target URI, any transport failure, or
    /// a non-200 remote response.
    pub async fn deliver(
        &self,
        target_uri: &str,
        activity: &serde_json::Value,
    ) -> Result<(), AppError> {
        let target = url::Url::parse(target_uri)
            .map_err(|e| AppError::Delivery(format!("invalid target URI {target_uri:?}: {e}")))?;

        let response = self
            .http_client
            .post(target)
            .header("Content-Type", "application/activity+json")
            .json(activity)
            .send()
            .await
            .map_err(|e| AppError::Delivery(format!("failed to deliver to {target_uri}: {e}")))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AppError::Delivery(format!(
                "{target_uri} rejected activity: HTTP {status}"
            )));
        }

        tracing::info!(target = %target_uri, "delivered activity");
        Ok(())
    }
}
