// ============================================================================
// Entity Records
// ============================================================================
//
// Plain data records plus a non-owning store handle used for relationship
// resolution. Kind dispatch goes through the AnyEntity tagged union so the
// store's add/delete paths are exhaustive at compile time.
//
// ============================================================================

pub mod bubble;
pub mod color;
pub mod handle;
pub mod team;

pub use bubble::{Bubble, BubbleArgs};
pub use color::{Color, ColorArgs};
pub use handle::StoreHandle;
pub use team::{Team, TeamArgs};

use crate::core::EntityKind;
use crate::store::StoreInner;
use std::sync::Arc;

/// Common surface of the three entity record types.
pub trait Entity {
    const KIND: EntityKind;

    fn id(&self) -> &str;
}

/// Tagged union over the entity kinds, used wherever a heterogeneous batch
/// of entities flows into the store (add, replace, bootstrap).
#[derive(Debug, Clone, PartialEq)]
pub enum AnyEntity {
    Team(Team),
    Color(Color),
    Bubble(Bubble),
}

impl AnyEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            AnyEntity::Team(_) => EntityKind::Team,
            AnyEntity::Color(_) => EntityKind::Color,
            AnyEntity::Bubble(_) => EntityKind::Bubble,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            AnyEntity::Team(team) => &team.id,
            AnyEntity::Color(color) => &color.id,
            AnyEntity::Bubble(bubble) => &bubble.id,
        }
    }

    pub(crate) fn attach(&mut self, inner: &Arc<StoreInner>) {
        match self {
            AnyEntity::Team(team) => team.store.attach(inner),
            AnyEntity::Color(color) => color.store.attach(inner),
            AnyEntity::Bubble(bubble) => bubble.store.attach(inner),
        }
    }
}

impl From<Team> for AnyEntity {
    fn from(team: Team) -> Self {
        AnyEntity::Team(team)
    }
}

impl From<Color> for AnyEntity {
    fn from(color: Color) -> Self {
        AnyEntity::Color(color)
    }
}

impl From<Bubble> for AnyEntity {
    fn from(bubble: Bubble) -> Self {
        AnyEntity::Bubble(bubble)
    }
}
