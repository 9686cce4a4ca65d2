use super::Collection;
use crate::core::{EntityKind, Result, StoreError};
use crate::model::{AnyEntity, Bubble, Color, Team};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::watch;

/// All collections live behind a single lock so multi-collection operations
/// (notably `replace`) are atomic with respect to every observer.
pub(crate) struct State {
    pub(crate) teams: Collection<Team>,
    pub(crate) colors: Collection<Color>,
    pub(crate) bubbles: Collection<Bubble>,
}

impl State {
    fn new() -> Self {
        Self {
            teams: Collection::new(),
            colors: Collection::new(),
            bubbles: Collection::new(),
        }
    }
}

pub(crate) struct StoreInner {
    pub(crate) state: RwLock<State>,
    changes: watch::Sender<u64>,
}

/// The single authoritative in-memory container for all entities.
///
/// Cheap to clone; clones share the same underlying state. Mutating
/// operations bump a version observable through [`EntityStore::subscribe`],
/// so derived reads are recomputed on demand rather than cached.
#[derive(Clone)]
pub struct EntityStore {
    inner: Arc<StoreInner>,
}

impl EntityStore {
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            inner: Arc::new(StoreInner {
                state: RwLock::new(State::new()),
                changes,
            }),
        }
    }

    /// Register one or more entities, attaching their store handles.
    pub fn add(&self, entities: impl IntoIterator<Item = AnyEntity>) {
        {
            let mut state = self.inner.state.write();
            for mut entity in entities {
                entity.attach(&self.inner);
                match entity {
                    AnyEntity::Team(team) => state.teams.add(team),
                    AnyEntity::Color(color) => state.colors.add(color),
                    AnyEntity::Bubble(bubble) => state.bubbles.add(bubble),
                }
            }
        }
        self.touch();
    }

    /// Remove an entity from its kind's collection.
    ///
    /// # Errors
    /// `EntityNotFound` if the entity is not currently registered; callers
    /// are expected to only delete entities they know to be present.
    pub fn delete(&self, kind: EntityKind, id: &str) -> Result<()> {
        {
            let mut state = self.inner.state.write();
            let removed = match kind {
                EntityKind::Team => state.teams.remove(id).map(|_| ()),
                EntityKind::Color => state.colors.remove(id).map(|_| ()),
                EntityKind::Bubble => state.bubbles.remove(id).map(|_| ()),
            };
            removed.ok_or_else(|| StoreError::EntityNotFound(id.to_string()))?;
        }
        self.touch();
        Ok(())
    }

    /// Clear every collection and install the given entity set. Performed
    /// under one write-lock acquisition: observers never see a transient
    /// empty store. Used once at bootstrap.
    pub fn replace(&self, entities: impl IntoIterator<Item = AnyEntity>) {
        {
            let mut state = self.inner.state.write();
            state.teams.clear();
            state.colors.clear();
            state.bubbles.clear();
            for mut entity in entities {
                entity.attach(&self.inner);
                match entity {
                    AnyEntity::Team(team) => state.teams.add(team),
                    AnyEntity::Color(color) => state.colors.add(color),
                    AnyEntity::Bubble(bubble) => state.bubbles.add(bubble),
                }
            }
        }
        self.touch();
    }

    pub fn team(&self, id: &str) -> Result<Team> {
        self.inner
            .state
            .read()
            .teams
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::EntityNotFound(id.to_string()))
    }

    pub fn color(&self, id: &str) -> Result<Color> {
        self.inner
            .state
            .read()
            .colors
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::EntityNotFound(id.to_string()))
    }

    pub fn bubble(&self, id: &str) -> Result<Bubble> {
        self.inner
            .state
            .read()
            .bubbles
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::EntityNotFound(id.to_string()))
    }

    pub fn teams(&self) -> Vec<Team> {
        self.inner.state.read().teams.iter().cloned().collect()
    }

    pub fn colors(&self) -> Vec<Color> {
        self.inner.state.read().colors.iter().cloned().collect()
    }

    pub fn bubbles(&self) -> Vec<Bubble> {
        self.inner.state.read().bubbles.iter().cloned().collect()
    }

    pub fn len(&self, kind: EntityKind) -> usize {
        let state = self.inner.state.read();
        match kind {
            EntityKind::Team => state.teams.len(),
            EntityKind::Color => state.colors.len(),
            EntityKind::Bubble => state.bubbles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        let state = self.inner.state.read();
        state.teams.is_empty() && state.colors.is_empty() && state.bubbles.is_empty()
    }

    /// Mutate a registered bubble in place. The callback must not resolve
    /// relationships through entity handles (the state lock is held).
    pub fn update_bubble<R>(&self, id: &str, f: impl FnOnce(&mut Bubble) -> R) -> Result<R> {
        let result = {
            let mut state = self.inner.state.write();
            let bubble = state
                .bubbles
                .get_mut(id)
                .ok_or_else(|| StoreError::EntityNotFound(id.to_string()))?;
            f(bubble)
        };
        self.touch();
        Ok(result)
    }

    /// Mutate a registered color in place. Same locking caveat as
    /// [`EntityStore::update_bubble`].
    pub fn update_color<R>(&self, id: &str, f: impl FnOnce(&mut Color) -> R) -> Result<R> {
        let result = {
            let mut state = self.inner.state.write();
            let color = state
                .colors
                .get_mut(id)
                .ok_or_else(|| StoreError::EntityNotFound(id.to_string()))?;
            f(color)
        };
        self.touch();
        Ok(result)
    }

    /// Current change version. Bumped once per mutating operation.
    pub fn version(&self) -> u64 {
        *self.inner.changes.borrow()
    }

    /// Observe store changes. Receivers wake whenever any mutating
    /// operation completes; derived reads should be recomputed then.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changes.subscribe()
    }

    fn touch(&self) {
        self.inner.changes.send_modify(|version| *version += 1);
    }
}

impl Default for EntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.read();
        f.debug_struct("EntityStore")
            .field("teams", &state.teams.len())
            .field("colors", &state.colors.len())
            .field("bubbles", &state.bubbles.len())
            .field("version", &self.version())
            .finish()
    }
}
