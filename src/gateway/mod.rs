// ============================================================================
// Remote Mutation Gateway
// ============================================================================
//
// Boundary to the remote authority: one bootstrap snapshot read and one
// typed mutation call. The in-memory implementation emulates the remote
// side in-process for development and tests.
//
// ============================================================================

pub mod commands;
pub mod memory;
pub mod snapshot;

pub use commands::MutationCommand;
pub use memory::{GatewayConfig, MemoryGateway};
pub use snapshot::{RemoteBubble, RemoteColor, RemoteState, RemoteTeam};

use crate::core::Result;
use async_trait::async_trait;

/// The remote authority consumed by the mutation core.
///
/// `mutate` may fail or be delayed; a failure means the mutation was not
/// applied remotely and the local side must roll back (or never apply).
#[async_trait]
pub trait RemoteGateway: Send + Sync {
    /// Fetch the full current state to seed the entity store at startup.
    async fn bootstrap(&self) -> Result<RemoteState>;

    /// Apply one typed command to authoritative storage.
    async fn mutate(&self, command: MutationCommand) -> Result<()>;
}
