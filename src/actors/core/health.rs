use chrono::{DateTime, Utc};
use serde::Serialize;

// ============================================================================
// Health Vocabulary
// ============================================================================
//
// Shared health types for the monitoring system. Components report one of
// three levels; the monitor aggregates them and the HTTP surface serializes
// them as-is.
//
// ============================================================================

/// Health status of a component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum HealthStatus {
    Healthy,
    Degraded(String),
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, HealthStatus::Degraded(_))
    }

    pub fn is_unhealthy(&self) -> bool {
        matches!(self, HealthStatus::Unhealthy(_))
    }

    /// Gauge encoding: 0=Unhealthy, 1=Degraded, 2=Healthy
    pub fn as_gauge_value(&self) -> i64 {
        match self {
            HealthStatus::Unhealthy(_) => 0,
            HealthStatus::Degraded(_) => 1,
            HealthStatus::Healthy => 2,
        }
    }
}

/// Health information for a component
#[derive(Debug, Clone, Serialize)]
pub struct ComponentHealth {
    pub name: String,
    pub status: HealthStatus,
    pub last_check: DateTime<Utc>,
    pub details: Option<String>,
}

impl ComponentHealth {
    pub fn new(name: impl Into<String>, status: HealthStatus) -> Self {
        Self {
            name: name.into(),
            status,
            last_check: Utc::now(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_predicates() {
        assert!(HealthStatus::Healthy.is_healthy());
        assert!(HealthStatus::Degraded("1 consecutive fetch failures".into()).is_degraded());
        assert!(HealthStatus::Unhealthy("3 consecutive fetch failures".into()).is_unhealthy());
    }

    #[test]
    fn test_gauge_encoding() {
        assert_eq!(HealthStatus::Healthy.as_gauge_value(), 2);
        assert_eq!(HealthStatus::Degraded("x".into()).as_gauge_value(), 1);
        assert_eq!(HealthStatus::Unhealthy("x".into()).as_gauge_value(), 0);
    }

    #[test]
    fn test_component_health_builder() {
        let health = ComponentHealth::new("recent_actors", HealthStatus::Healthy)
            .with_details("started");

        assert_eq!(health.name, "recent_actors");
        assert!(health.status.is_healthy());
        assert_eq!(health.details.as_deref(), Some("started"));
    }
}
