use super::{Color, Entity, StoreHandle, Team};
use crate::core::{BubbleSize, EntityId, EntityKind, Result, StoreError};
use chrono::{DateTime, Utc};

/// Arguments for constructing a [`Bubble`].
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleArgs {
    pub id: EntityId,
    pub team_id: EntityId,
    pub color_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub size: BubbleSize,
}

/// A bubble belonging to exactly one team and referencing exactly one of
/// that team's colors.
#[derive(Debug, Clone)]
pub struct Bubble {
    pub id: EntityId,
    pub team_id: EntityId,
    pub color_id: EntityId,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub size: BubbleSize,
    pub(crate) store: StoreHandle,
}

impl Bubble {
    pub fn new(args: BubbleArgs) -> Self {
        Self {
            id: args.id,
            team_id: args.team_id,
            color_id: args.color_id,
            created_at: args.created_at,
            description: args.description,
            size: args.size,
            store: StoreHandle::default(),
        }
    }

    /// The color this bubble references.
    ///
    /// # Errors
    /// `DetachedEntity` if this bubble was never registered;
    /// `EntityNotFound` if the referenced color is absent.
    pub fn color(&self) -> Result<Color> {
        self.store
            .with_state(&self.id, |state| state.colors.get(&self.color_id).cloned())?
            .ok_or_else(|| StoreError::EntityNotFound(self.color_id.clone()))
    }

    /// The team this bubble belongs to.
    pub fn team(&self) -> Result<Team> {
        self.store
            .with_state(&self.id, |state| state.teams.get(&self.team_id).cloned())?
            .ok_or_else(|| StoreError::EntityNotFound(self.team_id.clone()))
    }

    pub fn set_color_id(&mut self, color_id: impl Into<EntityId>) {
        self.color_id = color_id.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_size(&mut self, size: BubbleSize) {
        self.size = size;
    }
}

impl Entity for Bubble {
    const KIND: EntityKind = EntityKind::Bubble;

    fn id(&self) -> &str {
        &self.id
    }
}

impl PartialEq for Bubble {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.team_id == other.team_id
            && self.color_id == other.color_id
            && self.created_at == other.created_at
            && self.description == other.description
            && self.size == other.size
    }
}
