// ============================================================================
// Bootstrap Loader
// ============================================================================

use crate::core::Result;
use crate::gateway::{RemoteGateway, RemoteState};
use crate::model::{AnyEntity, Bubble, BubbleArgs, Color, ColorArgs, Team, TeamArgs};
use crate::store::EntityStore;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
}

impl LoadStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, LoadStatus::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadStatus::Loading)
    }
}

/// Fetches the remote snapshot and installs it in the store with one
/// atomic `replace`.
#[derive(Clone)]
pub struct DataLoader {
    store: EntityStore,
    gateway: Arc<dyn RemoteGateway>,
    status: watch::Sender<LoadStatus>,
}

impl DataLoader {
    pub fn new(store: EntityStore, gateway: Arc<dyn RemoteGateway>) -> Self {
        let (status, _) = watch::channel(LoadStatus::Idle);
        Self {
            store,
            gateway,
            status,
        }
    }

    pub fn status(&self) -> LoadStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// Fetch and install the bootstrap snapshot.
    pub async fn bootstrap(&self) -> Result<()> {
        self.status.send_replace(LoadStatus::Loading);
        let result = self.fetch_and_install().await;
        self.status.send_replace(LoadStatus::Idle);
        result
    }

    /// Spawned variant of [`DataLoader::bootstrap`]. Dropping the returned
    /// handle stops observing the result; the underlying fetch-and-replace
    /// still runs to completion.
    pub fn request_bootstrap(&self) -> JoinHandle<Result<()>> {
        let loader = self.clone();
        tokio::spawn(async move { loader.bootstrap().await })
    }

    async fn fetch_and_install(&self) -> Result<()> {
        let snapshot = self.gateway.bootstrap().await?;
        let entities = build_entities(snapshot);
        debug!(count = entities.len(), "installing bootstrap snapshot");
        self.store.replace(entities);
        Ok(())
    }
}

/// Flatten the nested snapshot into store entities.
fn build_entities(snapshot: RemoteState) -> Vec<AnyEntity> {
    let mut entities = Vec::new();
    for remote_team in snapshot.teams {
        entities.push(AnyEntity::Team(Team::new(TeamArgs {
            id: remote_team.id.clone(),
            name: remote_team.name,
        })));
        for remote_color in remote_team.colors {
            entities.push(AnyEntity::Color(Color::new(ColorArgs {
                id: remote_color.id,
                team_id: remote_team.id.clone(),
                name: remote_color.name,
                color: remote_color.color,
            })));
        }
        for remote_bubble in remote_team.bubbles {
            entities.push(AnyEntity::Bubble(Bubble::new(BubbleArgs {
                id: remote_bubble.id,
                team_id: remote_team.id.clone(),
                color_id: remote_bubble.color_id,
                created_at: remote_bubble.created_at,
                description: remote_bubble.description,
                size: remote_bubble.size,
            })));
        }
    }
    entities
}
