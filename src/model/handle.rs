use crate::core::{Result, StoreError};
use crate::store::{State, StoreInner};
use std::sync::{Arc, Weak};

/// Non-owning back-reference from an entity record to the store that
/// registered it. Used only to resolve derived relationships; it never
/// extends the store's lifetime.
///
/// A freshly constructed entity is detached. The store attaches the handle
/// when the entity is registered through `add` or `replace`.
#[derive(Clone, Default)]
pub struct StoreHandle {
    inner: Option<Weak<StoreInner>>,
}

impl StoreHandle {
    pub(crate) fn attach(&mut self, inner: &Arc<StoreInner>) {
        self.inner = Some(Arc::downgrade(inner));
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .as_ref()
            .map(|weak| weak.strong_count() > 0)
            .unwrap_or(false)
    }

    /// Run a closure against the owning store's state.
    ///
    /// # Errors
    /// Fails with `DetachedEntity` if the entity (identified by `owner`) was
    /// never registered, or if its store has been dropped.
    pub(crate) fn with_state<R>(&self, owner: &str, f: impl FnOnce(&State) -> R) -> Result<R> {
        let inner = self
            .inner
            .as_ref()
            .and_then(Weak::upgrade)
            .ok_or_else(|| StoreError::DetachedEntity(owner.to_string()))?;
        let state = inner.state.read();
        Ok(f(&state))
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_attached() {
            write!(f, "StoreHandle(attached)")
        } else {
            write!(f, "StoreHandle(detached)")
        }
    }
}
