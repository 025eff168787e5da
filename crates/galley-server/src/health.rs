//! Liveness endpoint.

use serde::{Deserialize, Serialize};

/// Path answered by [`HealthCheck`].
pub const HEALTH_PATH: &str = "/health";

/// Body of a `GET /health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Always `"ok"` while the process is serving.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

/// Reports liveness for a named service.
///
/// # Example
///
/// ```rust
/// use galley_server::HealthCheck;
///
/// let health = HealthCheck::new("galley", "0.1.0");
/// assert_eq!(health.status().status, "ok");
/// ```
#[derive(Debug, Clone)]
pub struct HealthCheck {
    service: String,
    version: String,
}

impl HealthCheck {
    /// Creates a health check.
    #[must_use]
    pub fn new(service: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            version: version.into(),
        }
    }

    /// Returns the current status.
    #[must_use]
    pub fn status(&self) -> HealthStatus {
        HealthStatus {
            status: "ok".to_string(),
            service: self.service.clone(),
            version: self.version.clone(),
        }
    }

    /// Returns the service name.
    #[must_use]
    pub fn service(&self) -> &str {
        &self.service
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_flat() {
        let health = HealthCheck::new("galley", "1.2.3");
        let value = serde_json::to_value(health.status()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "status": "ok", "service": "galley", "version": "1.2.3" })
        );
    }
}
