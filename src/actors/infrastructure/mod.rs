// ============================================================================
// Infrastructure Actors
// ============================================================================
//
// Concrete actors for system concerns:
// - Periodic fetch-and-display polling
// - Health monitoring
// - Coordination and graceful shutdown
//
// ============================================================================

// Private module declarations
mod coordinator;
mod health_monitor;
mod poller;

// Re-export for public API
pub use coordinator::{CoordinatorActor, Shutdown};
pub use health_monitor::{
    GetSystemHealth, HealthMonitorActor, SystemHealth, SystemHealthCell, UpdateHealth,
};
pub use poller::{GetPollerStatus, PollerActor, PollerStatus};
