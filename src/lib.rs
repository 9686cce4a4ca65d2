// ============================================================================
// Bubbleboard Library
// ============================================================================
//
// Client-side normalized entity store with an optimistic mutation core:
// actions describe a mutation as reversible local effects plus one remote
// confirmation; a keyed lock manager serializes overlapping mutations; two
// execution strategies decide whether effects apply before (optimistic,
// rolled back on failure) or after (blocking, buffered) the remote
// authority confirms.
//
// ============================================================================

pub mod action;
pub mod core;
pub mod exec;
pub mod facade;
pub mod gateway;
pub mod loader;
pub mod lock;
pub mod model;
pub mod notify;
pub mod store;

// Re-export main types for convenience
pub use crate::core::{BubbleSize, EntityId, EntityKind, ResourceKey, Result, StoreError};
pub use action::{
    Action, ActionContext, CreateBubble, CreateColor, DeleteBubble, DeleteColor, Effect, Plan,
    SetBubbleColor, SetBubbleDescription, SetBubbleSize, SetColorName, SetColorValue, Undo,
};
pub use exec::{ActionStatus, BlockingDriver, OptimisticDriver};
pub use facade::Board;
pub use gateway::{
    GatewayConfig, MemoryGateway, MutationCommand, RemoteBubble, RemoteColor, RemoteGateway,
    RemoteState, RemoteTeam,
};
pub use loader::{DataLoader, LoadStatus};
pub use lock::{KeyedLockGuard, KeyedLockManager, SingularLock};
pub use model::{AnyEntity, Bubble, BubbleArgs, Color, ColorArgs, Entity, Team, TeamArgs};
pub use notify::{Notice, NoticeLevel, Notifier};
pub use store::{Collection, EntityStore};
