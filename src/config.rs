use std::time::Duration;

// ============================================================================
// Dashboard Configuration
// ============================================================================
//
// One value is deploy-time configuration: the backend base URL, read from
// BACKEND_BASE_URL at startup and never re-read. Everything else is a code
// default on the struct, overridable in construction (and in tests).
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Base URL of the events REST API, without a trailing slash
    pub backend_base_url: String,
    /// Period of the recurring fetch trigger
    pub poll_interval: Duration,
    /// Per-request timeout, so a hung backend turns into a countable failure
    pub request_timeout: Duration,
    /// Consecutive fetch failures at which a poller reports Unhealthy
    pub unhealthy_after: u32,
    /// Port for the metrics/health HTTP server
    pub metrics_port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            backend_base_url: "http://127.0.0.1:8000".to_string(),
            poll_interval: Duration::from_secs(5),
            request_timeout: Duration::from_secs(15),
            unhealthy_after: 3,
            metrics_port: 9090,
        }
    }
}

impl DashboardConfig {
    /// Resolve the deploy-time configuration.
    /// Example: BACKEND_BASE_URL=http://events-api.internal:8000 cargo run
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("BACKEND_BASE_URL") {
            config.backend_base_url = url.trim_end_matches('/').to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.backend_base_url, "http://127.0.0.1:8000");
        assert_eq!(config.poll_interval, Duration::from_secs(5));
        assert_eq!(config.unhealthy_after, 3);
    }

    #[test]
    fn test_from_env_strips_trailing_slash() {
        std::env::set_var("BACKEND_BASE_URL", "http://localhost:9000/");
        let config = DashboardConfig::from_env();
        std::env::remove_var("BACKEND_BASE_URL");

        assert_eq!(config.backend_base_url, "http://localhost:9000");
    }
}
