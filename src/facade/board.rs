use crate::action::ActionContext;
use crate::exec::{BlockingDriver, OptimisticDriver};
use crate::gateway::{MemoryGateway, RemoteGateway};
use crate::loader::DataLoader;
use crate::lock::KeyedLockManager;
use crate::notify::Notifier;
use crate::store::EntityStore;
use std::sync::Arc;

/// Wired-together mutation core: store, gateway, lock manager, notifier
/// and loader, plus constructors for the two execution drivers.
///
/// # Examples
///
/// ```
/// use bubbleboard::{Board, SetColorName};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> bubbleboard::Result<()> {
/// let board = Board::new();
/// board.loader().bootstrap().await?;
///
/// let color = board.store().colors().remove(0);
/// board
///     .blocking()
///     .execute(SetColorName::new(color.id.clone(), "Renamed"))
///     .await?;
/// assert_eq!(board.store().color(&color.id)?.name, "Renamed");
/// # Ok(())
/// # }
/// ```
pub struct Board {
    store: EntityStore,
    gateway: Arc<dyn RemoteGateway>,
    locks: Arc<KeyedLockManager>,
    notifier: Notifier,
    loader: DataLoader,
}

impl Board {
    /// Board backed by the seeded in-memory gateway.
    pub fn new() -> Self {
        Self::with_gateway(Arc::new(MemoryGateway::new()))
    }

    /// Board backed by a caller-supplied gateway implementation.
    pub fn with_gateway(gateway: Arc<dyn RemoteGateway>) -> Self {
        let store = EntityStore::new();
        let notifier = Notifier::new();
        let locks = Arc::new(KeyedLockManager::new());
        let loader = DataLoader::new(store.clone(), gateway.clone());
        Self {
            store,
            gateway,
            locks,
            notifier,
            loader,
        }
    }

    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    pub fn gateway(&self) -> &Arc<dyn RemoteGateway> {
        &self.gateway
    }

    pub fn locks(&self) -> &Arc<KeyedLockManager> {
        &self.locks
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn loader(&self) -> &DataLoader {
        &self.loader
    }

    /// The dependency bundle handed to actions.
    pub fn context(&self) -> ActionContext {
        ActionContext::new(
            self.store.clone(),
            self.gateway.clone(),
            self.notifier.clone(),
        )
    }

    /// A fresh optimistic driver sharing this board's lock manager.
    pub fn optimistic(&self) -> OptimisticDriver {
        OptimisticDriver::new(self.context(), self.locks.clone())
    }

    /// A fresh blocking driver sharing this board's lock manager.
    pub fn blocking(&self) -> BlockingDriver {
        BlockingDriver::new(self.context(), self.locks.clone())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CreateBubble, SetBubbleDescription};
    use crate::core::{BubbleSize, EntityKind};
    use crate::gateway::GatewayConfig;
    use crate::model::BubbleArgs;
    use chrono::Utc;
    use std::time::Duration;
    use uuid::Uuid;

    fn fast_board() -> Board {
        Board::with_gateway(Arc::new(MemoryGateway::with_config(
            GatewayConfig::new().latency(Duration::ZERO),
        )))
    }

    #[tokio::test]
    async fn test_end_to_end_create_and_update() {
        let board = fast_board();
        board.loader().bootstrap().await.unwrap();

        let team = board.store().teams().remove(0);
        let color = team.colors().unwrap().remove(0);
        let bubble_id = Uuid::new_v4().to_string();

        board
            .blocking()
            .execute(CreateBubble::new(BubbleArgs {
                id: bubble_id.clone(),
                team_id: team.id.clone(),
                color_id: color.id.clone(),
                created_at: Utc::now(),
                description: "fresh".into(),
                size: BubbleSize::Small,
            }))
            .await
            .unwrap();
        assert_eq!(board.store().len(EntityKind::Bubble), 3);

        board
            .blocking()
            .execute(SetBubbleDescription::new(bubble_id.clone(), "edited"))
            .await
            .unwrap();
        assert_eq!(
            board.store().bubble(&bubble_id).unwrap().description,
            "edited"
        );
    }
}
