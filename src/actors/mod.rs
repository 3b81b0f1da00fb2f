// ============================================================================
// Actors Module
// ============================================================================
//
// Actor-based infrastructure for the dashboard's periodic work.
//
// Structure:
// - core/           - Shared types (health vocabulary, stop message)
// - infrastructure/ - Concrete actors (pollers, health monitor, coordinator)
//
// The record models and the display store are plain data; actors are
// reserved for the recurring triggers and supervision.
//
// ============================================================================

// Private module declarations
mod core;
mod infrastructure;

// Re-export only what's needed in the public API
pub use infrastructure::{CoordinatorActor, Shutdown};

// Internal re-exports for use within the crate
pub(crate) use self::core::HealthStatus;
pub(crate) use infrastructure::{SystemHealth, SystemHealthCell};
