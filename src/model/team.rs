use super::{Bubble, Color, Entity, StoreHandle};
use crate::core::{EntityId, EntityKind, Result};

/// Arguments for constructing a [`Team`].
#[derive(Debug, Clone, PartialEq)]
pub struct TeamArgs {
    pub id: EntityId,
    pub name: String,
}

/// A team owning colors and bubbles by reference.
#[derive(Debug, Clone)]
pub struct Team {
    pub id: EntityId,
    pub name: String,
    pub(crate) store: StoreHandle,
}

impl Team {
    pub fn new(args: TeamArgs) -> Self {
        Self {
            id: args.id,
            name: args.name,
            store: StoreHandle::default(),
        }
    }

    /// Colors belonging to this team. Derived by filtering the store on
    /// every call; never cached.
    pub fn colors(&self) -> Result<Vec<Color>> {
        self.store.with_state(&self.id, |state| {
            state
                .colors
                .iter()
                .filter(|color| color.team_id == self.id)
                .cloned()
                .collect()
        })
    }

    /// Bubbles belonging to this team. Derived, never cached.
    pub fn bubbles(&self) -> Result<Vec<Bubble>> {
        self.store.with_state(&self.id, |state| {
            state
                .bubbles
                .iter()
                .filter(|bubble| bubble.team_id == self.id)
                .cloned()
                .collect()
        })
    }
}

impl Entity for Team {
    const KIND: EntityKind = EntityKind::Team;

    fn id(&self) -> &str {
        &self.id
    }
}

// Equality compares the record's data fields; the store handle is not part
// of the entity's identity.
impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.name == other.name
    }
}
