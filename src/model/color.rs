use super::{Entity, StoreHandle, Team};
use crate::core::{EntityId, EntityKind, Result, StoreError};

/// Arguments for constructing a [`Color`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorArgs {
    pub id: EntityId,
    pub team_id: EntityId,
    pub name: String,
    pub color: String,
}

/// A named color value belonging to exactly one team.
#[derive(Debug, Clone)]
pub struct Color {
    pub id: EntityId,
    pub team_id: EntityId,
    pub name: String,
    pub color: String,
    pub(crate) store: StoreHandle,
}

impl Color {
    pub fn new(args: ColorArgs) -> Self {
        Self {
            id: args.id,
            team_id: args.team_id,
            name: args.name,
            color: args.color,
            store: StoreHandle::default(),
        }
    }

    /// The team this color belongs to.
    ///
    /// # Errors
    /// `DetachedEntity` if this color was never registered;
    /// `EntityNotFound` if the referenced team is absent.
    pub fn team(&self) -> Result<Team> {
        self.store
            .with_state(&self.id, |state| state.teams.get(&self.team_id).cloned())?
            .ok_or_else(|| StoreError::EntityNotFound(self.team_id.clone()))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_color(&mut self, color: impl Into<String>) {
        self.color = color.into();
    }
}

impl Entity for Color {
    const KIND: EntityKind = EntityKind::Color;

    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.team_id == other.team_id
            && self.name == other.name
            && self.color == other.color
    }
}
