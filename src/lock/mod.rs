// ============================================================================
// Lock Manager
// ============================================================================
//
// Key-based mutual exclusion: mutations touching overlapping resource keys
// are serialized FIFO, mutations on disjoint keys run freely. The store is
// never protected by a single global lock.
//
// ============================================================================

pub mod keyed;
pub mod singular;

pub use keyed::{KeyedLockGuard, KeyedLockManager};
pub use singular::SingularLock;
