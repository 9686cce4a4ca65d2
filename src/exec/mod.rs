// ============================================================================
// Execution Strategies
// ============================================================================
//
// Two drivers over the action protocol. Both acquire the action's derived
// keys before any effect runs, so overlapping actions serialize regardless
// of which strategy drives them; they differ in when effects reach the
// store and how failures surface.
//
// ============================================================================

pub mod blocking;
pub mod optimistic;
pub mod status;

pub use blocking::BlockingDriver;
pub use optimistic::OptimisticDriver;
pub use status::ActionStatus;

use crate::action::{ActionContext, Undo};
use tracing::warn;

/// Invoke inverses last-applied-first, restoring the pre-action state.
pub(crate) fn unwind(ctx: &ActionContext, applied: Vec<Undo>) {
    for inverse in applied.into_iter().rev() {
        if let Err(error) = inverse(ctx) {
            warn!(%error, "inverse operation failed during rollback");
        }
    }
}
