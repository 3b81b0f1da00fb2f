use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use actix::prelude::*;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::actors::core::{ComponentHealth, GracefulStop, HealthStatus};
use crate::metrics::Metrics;

// ============================================================================
// Health Monitor Actor - Monitors system health
// ============================================================================
//
// Responsibilities:
// - Track the latest health status reported by each component
// - Aggregate system-wide health (Unhealthy > Degraded > Healthy)
// - Publish every recomputed aggregate into a shared cell for the HTTP
//   health endpoint and mirror the overall level into a gauge
//
// Pollers push an update after every fetch cycle, so persistent backend
// failure becomes visible here instead of only in the logs.
//
// ============================================================================

// ============================================================================
// Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "()")]
pub struct UpdateHealth {
    pub component: String,
    pub status: HealthStatus,
    pub details: Option<String>,
}

#[derive(Message)]
#[rtype(result = "SystemHealth")]
pub struct GetSystemHealth;

#[derive(Debug, Clone, Serialize)]
pub struct SystemHealth {
    pub overall_status: HealthStatus,
    pub components: HashMap<String, ComponentHealth>,
    pub check_time: DateTime<Utc>,
}

impl Default for SystemHealth {
    fn default() -> Self {
        Self {
            overall_status: HealthStatus::Healthy,
            components: HashMap::new(),
            check_time: Utc::now(),
        }
    }
}

/// Shared copy of the latest aggregate, readable from outside the actor
/// system (the metrics server thread serves it on /health)
pub struct SystemHealthCell {
    inner: RwLock<SystemHealth>,
}

impl SystemHealthCell {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(SystemHealth::default()),
        }
    }

    pub fn snapshot(&self) -> SystemHealth {
        self.inner.read().expect("health cell poisoned").clone()
    }

    fn store(&self, health: SystemHealth) {
        *self.inner.write().expect("health cell poisoned") = health;
    }
}

impl Default for SystemHealthCell {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Health Monitor Actor
// ============================================================================

pub struct HealthMonitorActor {
    components: HashMap<String, ComponentHealth>,
    shared: Arc<SystemHealthCell>,
    metrics: Arc<Metrics>,
}

impl HealthMonitorActor {
    pub fn new(shared: Arc<SystemHealthCell>, metrics: Arc<Metrics>) -> Self {
        Self {
            components: HashMap::new(),
            shared,
            metrics,
        }
    }

    fn compute_overall_status(&self) -> HealthStatus {
        let mut has_degraded = false;
        let mut unhealthy_components = Vec::new();

        for (name, health) in &self.components {
            match &health.status {
                HealthStatus::Unhealthy(msg) => {
                    unhealthy_components.push(format!("{}: {}", name, msg));
                }
                HealthStatus::Degraded(_) => {
                    has_degraded = true;
                }
                HealthStatus::Healthy => {}
            }
        }

        if !unhealthy_components.is_empty() {
            HealthStatus::Unhealthy(unhealthy_components.join(", "))
        } else if has_degraded {
            HealthStatus::Degraded("Some components degraded".to_string())
        } else {
            HealthStatus::Healthy
        }
    }

    fn system_health(&self) -> SystemHealth {
        SystemHealth {
            overall_status: self.compute_overall_status(),
            components: self.components.clone(),
            check_time: Utc::now(),
        }
    }

    fn publish(&self) {
        let health = self.system_health();
        self.metrics.set_system_health(&health.overall_status);
        self.shared.store(health);
    }
}

impl Actor for HealthMonitorActor {
    type Context = Context<Self>;

    fn started(&mut self, _: &mut Self::Context) {
        tracing::info!("HealthMonitorActor started");
        self.publish();
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<UpdateHealth> for HealthMonitorActor {
    type Result = ();

    fn handle(&mut self, msg: UpdateHealth, _: &mut Self::Context) {
        let mut health = ComponentHealth::new(msg.component.clone(), msg.status);
        if let Some(details) = msg.details {
            health = health.with_details(details);
        }

        tracing::debug!(
            component = %msg.component,
            status = ?health.status,
            "Updated component health"
        );

        self.components.insert(msg.component, health);
        self.publish();
    }
}

impl Handler<GetSystemHealth> for HealthMonitorActor {
    type Result = MessageResult<GetSystemHealth>;

    fn handle(&mut self, _: GetSystemHealth, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.system_health())
    }
}

impl Handler<GracefulStop> for HealthMonitorActor {
    type Result = ();

    fn handle(&mut self, _: GracefulStop, ctx: &mut Self::Context) {
        tracing::info!("HealthMonitorActor received stop signal");
        ctx.stop();
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn monitor() -> (Addr<HealthMonitorActor>, Arc<SystemHealthCell>) {
        let cell = Arc::new(SystemHealthCell::new());
        let metrics = Arc::new(Metrics::new().unwrap());
        let addr = HealthMonitorActor::new(cell.clone(), metrics).start();
        (addr, cell)
    }

    #[actix::test]
    async fn test_empty_system_is_healthy() {
        let (addr, _cell) = monitor();
        let health = addr.send(GetSystemHealth).await.unwrap();
        assert!(health.overall_status.is_healthy());
        assert!(health.components.is_empty());
    }

    #[actix::test]
    async fn test_degraded_component_degrades_system() {
        let (addr, _cell) = monitor();

        addr.send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Degraded("1 consecutive fetch failures".to_string()),
            details: None,
        })
        .await
        .unwrap();

        let health = addr.send(GetSystemHealth).await.unwrap();
        assert!(health.overall_status.is_degraded());
        assert!(health.components.contains_key("recent_actors"));
    }

    #[actix::test]
    async fn test_unhealthy_dominates_degraded() {
        let (addr, _cell) = monitor();

        addr.send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Degraded("1 consecutive fetch failures".to_string()),
            details: None,
        })
        .await
        .unwrap();
        addr.send(UpdateHealth {
            component: "recent_repositories".to_string(),
            status: HealthStatus::Unhealthy("3 consecutive fetch failures".to_string()),
            details: Some("backend returned 500".to_string()),
        })
        .await
        .unwrap();

        let health = addr.send(GetSystemHealth).await.unwrap();
        assert!(health.overall_status.is_unhealthy());
    }

    #[actix::test]
    async fn test_updates_are_published_to_shared_cell() {
        let (addr, cell) = monitor();

        addr.send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Unhealthy("3 consecutive fetch failures".to_string()),
            details: None,
        })
        .await
        .unwrap();

        let snapshot = cell.snapshot();
        assert!(snapshot.overall_status.is_unhealthy());
        assert_eq!(snapshot.components.len(), 1);
    }

    #[actix::test]
    async fn test_recovery_returns_system_to_healthy() {
        let (addr, cell) = monitor();

        addr.send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Unhealthy("3 consecutive fetch failures".to_string()),
            details: None,
        })
        .await
        .unwrap();
        addr.send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Healthy,
            details: None,
        })
        .await
        .unwrap();

        assert!(cell.snapshot().overall_status.is_healthy());
    }
}
