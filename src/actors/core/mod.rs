use actix::prelude::*;

// ============================================================================
// Core Actor Abstractions
// ============================================================================
//
// Generic types shared by the infrastructure actors.
//
// ============================================================================

pub mod health;

pub use health::*;

/// Message asking a supervised actor to stop cleanly, releasing any
/// recurring triggers it owns
#[derive(Message)]
#[rtype(result = "()")]
pub struct GracefulStop;
