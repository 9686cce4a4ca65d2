use super::{Result, StoreError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Globally unique entity identifier. Opaque to the core; the reference
/// gateway seeds UUIDs but any unique string works.
pub type EntityId = String;

/// Lockable unit identifier, typically an entity id.
pub type ResourceKey = String;

/// Static tag for the three entity kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Team,
    Color,
    Bubble,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Team => "team",
            EntityKind::Color => "color",
            EntityKind::Bubble => "bubble",
        }
    }
}

impl FromStr for EntityKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "team" => Ok(EntityKind::Team),
            "color" => Ok(EntityKind::Color),
            "bubble" => Ok(EntityKind::Bubble),
            other => Err(StoreError::UnknownEntityKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bubble size. Serialized on the wire as `"s"`, `"m"`, `"l"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BubbleSize {
    #[serde(rename = "s")]
    Small,
    #[serde(rename = "m")]
    Medium,
    #[serde(rename = "l")]
    Large,
}

impl std::fmt::Display for BubbleSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BubbleSize::Small => write!(f, "small"),
            BubbleSize::Medium => write!(f, "medium"),
            BubbleSize::Large => write!(f, "large"),
        }
    }
}
