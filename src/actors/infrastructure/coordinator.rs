use std::sync::Arc;

use actix::prelude::*;

use crate::actors::core::{GracefulStop, HealthStatus};
use crate::api::{BackendClient, RecentActorsEndpoint, RecentRepositoriesEndpoint};
use crate::config::DashboardConfig;
use crate::display::DisplayState;
use crate::metrics::Metrics;
use crate::models::{ActorRecord, RepositoryRecord};

use super::health_monitor::{GetSystemHealth, HealthMonitorActor, SystemHealthCell, UpdateHealth};
use super::poller::PollerActor;

// ============================================================================
// Coordinator Actor - Orchestrates all dashboard actors
// ============================================================================
//
// Responsibilities:
// - Manages lifecycle of child actors (pollers, health monitor)
// - Coordinates graceful shutdown: every recurring trigger is owned by a
//   child actor, so stopping the children releases them on every exit path
// - Logs a periodic system health summary
//
// Actor Hierarchy:
//   CoordinatorActor (Supervisor)
//   ├── PollerActor<RecentActorsEndpoint>
//   ├── PollerActor<RecentRepositoriesEndpoint>
//   └── HealthMonitorActor
//
// ============================================================================

pub struct CoordinatorActor {
    config: DashboardConfig,
    backend: Arc<BackendClient>,
    actors_state: Arc<DisplayState<ActorRecord>>,
    repositories_state: Arc<DisplayState<RepositoryRecord>>,
    metrics: Arc<Metrics>,
    health_cell: Arc<SystemHealthCell>,
    health_monitor: Option<Addr<HealthMonitorActor>>,
    actors_poller: Option<Addr<PollerActor<RecentActorsEndpoint>>>,
    repositories_poller: Option<Addr<PollerActor<RecentRepositoriesEndpoint>>>,
}

impl CoordinatorActor {
    pub fn new(
        config: DashboardConfig,
        backend: Arc<BackendClient>,
        actors_state: Arc<DisplayState<ActorRecord>>,
        repositories_state: Arc<DisplayState<RepositoryRecord>>,
        metrics: Arc<Metrics>,
        health_cell: Arc<SystemHealthCell>,
    ) -> Self {
        Self {
            config,
            backend,
            actors_state,
            repositories_state,
            metrics,
            health_cell,
            health_monitor: None,
            actors_poller: None,
            repositories_poller: None,
        }
    }

    fn start_child_actors(&mut self, _ctx: &mut Context<Self>) {
        tracing::info!("Starting supervised child actors");

        // Start health monitor actor
        let health_monitor =
            HealthMonitorActor::new(self.health_cell.clone(), self.metrics.clone()).start();
        self.health_monitor = Some(health_monitor.clone());

        // Start the recent-actors poller
        let actors_poller = PollerActor::new(
            Arc::new(RecentActorsEndpoint::new(self.backend.clone())),
            self.actors_state.clone(),
            Some(health_monitor.clone()),
            self.metrics.clone(),
            self.config.poll_interval,
            self.config.unhealthy_after,
        )
        .start();
        self.actors_poller = Some(actors_poller);

        health_monitor.do_send(UpdateHealth {
            component: "recent_actors".to_string(),
            status: HealthStatus::Healthy,
            details: Some("Poller started".to_string()),
        });

        // Start the recent-repositories poller
        let repositories_poller = PollerActor::new(
            Arc::new(RecentRepositoriesEndpoint::new(self.backend.clone())),
            self.repositories_state.clone(),
            Some(health_monitor.clone()),
            self.metrics.clone(),
            self.config.poll_interval,
            self.config.unhealthy_after,
        )
        .start();
        self.repositories_poller = Some(repositories_poller);

        health_monitor.do_send(UpdateHealth {
            component: "recent_repositories".to_string(),
            status: HealthStatus::Healthy,
            details: Some("Poller started".to_string()),
        });

        tracing::info!("✅ All supervised actors started successfully");
    }
}

impl Actor for CoordinatorActor {
    type Context = Context<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::info!("🎯 CoordinatorActor started - events dashboard");
        self.start_child_actors(ctx);

        // Periodic system health summary in the logs
        ctx.run_interval(std::time::Duration::from_secs(30), |act, _ctx| {
            if let Some(ref health_monitor) = act.health_monitor {
                let health_monitor = health_monitor.clone();
                actix::spawn(async move {
                    match health_monitor.send(GetSystemHealth).await {
                        Ok(health) => match health.overall_status {
                            HealthStatus::Healthy => {
                                tracing::debug!("System health check: Healthy");
                            }
                            HealthStatus::Degraded(ref msg) => {
                                tracing::warn!("System health check: Degraded - {}", msg);
                            }
                            HealthStatus::Unhealthy(ref msg) => {
                                tracing::error!("System health check: Unhealthy - {}", msg);
                            }
                        },
                        Err(e) => {
                            tracing::error!("Failed to get system health: {}", e);
                        }
                    }
                });
            }
        });
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        tracing::info!("🛑 CoordinatorActor stopping - initiating graceful shutdown");
        Running::Stop
    }

    fn stopped(&mut self, _: &mut Self::Context) {
        tracing::info!("🛑 CoordinatorActor stopped");
    }
}

// ============================================================================
// Messages
// ============================================================================

#[derive(Message)]
#[rtype(result = "Result<(), String>")]
pub struct Shutdown;

impl Handler<Shutdown> for CoordinatorActor {
    type Result = Result<(), String>;

    fn handle(&mut self, _msg: Shutdown, ctx: &mut Self::Context) -> Self::Result {
        tracing::info!("Received shutdown signal");

        // Stop child actors gracefully; their recurring triggers die with them
        if let Some(ref actors_poller) = self.actors_poller {
            actors_poller.do_send(GracefulStop);
        }

        if let Some(ref repositories_poller) = self.repositories_poller {
            repositories_poller.do_send(GracefulStop);
        }

        if let Some(ref health_monitor) = self.health_monitor {
            health_monitor.do_send(GracefulStop);
        }

        // Stop coordinator
        ctx.stop();

        Ok(())
    }
}

// ============================================================================
// Integration Tests
// ============================================================================
