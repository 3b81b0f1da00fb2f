// ============================================================================
// Display Module
// ============================================================================
//
// The in-memory "view model" side of the dashboard: one sequence-guarded,
// id-sorted snapshot store per displayed list. Rendering itself lives with
// whoever subscribes.
//
// ============================================================================

mod state;

pub use state::{ApplyOutcome, DisplaySnapshot, DisplayState};
