/// Blocking execution tests
///
/// The blocking driver buffers every effect until the remote call succeeds;
/// a failed call must leave the store untouched at every point in time.
use async_trait::async_trait;
use bubbleboard::{
    ActionContext, AnyEntity, BlockingDriver, Bubble, BubbleArgs, BubbleSize, Color, ColorArgs,
    EntityStore, KeyedLockManager, MutationCommand, Notifier, RemoteGateway, RemoteState, Result,
    SetBubbleDescription, StoreError, Team, TeamArgs,
};
use chrono::Utc;
use std::sync::Arc;

fn seed(store: &EntityStore) {
    store.add([
        AnyEntity::Team(Team::new(TeamArgs {
            id: "t1".into(),
            name: "Private".into(),
        })),
        AnyEntity::Color(Color::new(ColorArgs {
            id: "c1".into(),
            team_id: "t1".into(),
            name: "Lime".into(),
            color: "#44ff00".into(),
        })),
        AnyEntity::Bubble(Bubble::new(BubbleArgs {
            id: "b1".into(),
            team_id: "t1".into(),
            color_id: "c1".into(),
            created_at: Utc::now(),
            description: "original".into(),
            size: BubbleSize::Medium,
        })),
    ]);
}

fn driver_with(store: &EntityStore, gateway: Arc<dyn RemoteGateway>) -> BlockingDriver {
    let ctx = ActionContext::new(store.clone(), gateway, Notifier::new());
    BlockingDriver::new(ctx, Arc::new(KeyedLockManager::new()))
}

/// Observes the store's change version from inside the remote call, then
/// fails; proves no local mutation happened while the call was in flight.
struct FailingProbeGateway {
    store: EntityStore,
    version_during_call: parking_lot::Mutex<Option<u64>>,
}

#[async_trait]
impl RemoteGateway for FailingProbeGateway {
    async fn bootstrap(&self) -> Result<RemoteState> {
        Ok(RemoteState::default())
    }

    async fn mutate(&self, _command: MutationCommand) -> Result<()> {
        *self.version_during_call.lock() = Some(self.store.version());
        Err(StoreError::RemoteMutationFailed("scripted failure".into()))
    }
}

#[tokio::test]
async fn test_buffered_no_leak_on_failure() {
    let store = EntityStore::new();
    seed(&store);
    let gateway = Arc::new(FailingProbeGateway {
        store: store.clone(),
        version_during_call: parking_lot::Mutex::new(None),
    });
    let driver = driver_with(&store, gateway.clone());

    let version_before = store.version();
    let err = driver
        .execute(SetBubbleDescription::new("b1", "never applied"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::RemoteMutationFailed(_)));

    // untouched during the call and after it
    assert_eq!(gateway.version_during_call.lock().unwrap(), version_before);
    assert_eq!(store.version(), version_before);
    assert_eq!(store.bubble("b1").unwrap().description, "original");
}

#[tokio::test]
async fn test_failure_notice_reaches_subscribers() {
    let store = EntityStore::new();
    seed(&store);
    let gateway = Arc::new(FailingProbeGateway {
        store: store.clone(),
        version_during_call: parking_lot::Mutex::new(None),
    });
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();
    let ctx = ActionContext::new(store.clone(), gateway, notifier.clone());
    let driver = BlockingDriver::new(ctx, Arc::new(KeyedLockManager::new()));

    driver
        .execute(SetBubbleDescription::new("b1", "doomed"))
        .await
        .unwrap_err();

    let notice = notices.try_recv().unwrap();
    assert_eq!(notice.message, "Failed to set the bubble's description");
}

/// Applies commands but parks until released, so tests can observe the
/// driver mid-flight.
struct GatedGateway {
    release: tokio::sync::Semaphore,
}

#[async_trait]
impl RemoteGateway for GatedGateway {
    async fn bootstrap(&self) -> Result<RemoteState> {
        Ok(RemoteState::default())
    }

    async fn mutate(&self, _command: MutationCommand) -> Result<()> {
        match self.release.acquire().await {
            Ok(permit) => {
                permit.forget();
                Ok(())
            }
            Err(_) => Err(StoreError::RemoteMutationFailed("gateway closed".into())),
        }
    }
}

#[tokio::test]
async fn test_not_idle_while_in_flight() {
    let store = EntityStore::new();
    seed(&store);
    let gateway = Arc::new(GatedGateway {
        release: tokio::sync::Semaphore::new(0),
    });
    let driver = Arc::new(driver_with(&store, gateway.clone()));

    let first = {
        let driver = driver.clone();
        tokio::spawn(async move {
            driver
                .execute(SetBubbleDescription::new("b1", "first"))
                .await
        })
    };
    tokio::task::yield_now().await;
    assert!(driver.status().is_executing());

    // effects stay buffered while the remote call is parked
    assert_eq!(store.bubble("b1").unwrap().description, "original");

    let err = driver
        .execute(SetBubbleDescription::new("b1", "second"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotIdle));

    gateway.release.add_permits(1);
    first.await.unwrap().unwrap();
    assert!(driver.status().is_idle());
    assert_eq!(store.bubble("b1").unwrap().description, "first");
}

#[tokio::test]
async fn test_status_passes_through_queued_when_contended() {
    let store = EntityStore::new();
    seed(&store);
    let locks = Arc::new(KeyedLockManager::new());
    let gateway = Arc::new(GatedGateway {
        release: tokio::sync::Semaphore::new(1),
    });
    let ctx = ActionContext::new(store.clone(), gateway, Notifier::new());
    let driver = Arc::new(BlockingDriver::new(ctx, locks.clone()));

    let held = locks.try_acquire(&["b1".to_string()]).unwrap();
    let contender = {
        let driver = driver.clone();
        tokio::spawn(async move {
            driver
                .execute(SetBubbleDescription::new("b1", "waited"))
                .await
        })
    };
    tokio::task::yield_now().await;
    assert!(driver.status().is_queued());

    drop(held);
    contender.await.unwrap().unwrap();
    assert!(driver.status().is_idle());
    assert_eq!(store.bubble("b1").unwrap().description, "waited");
}

#[tokio::test]
async fn test_update_field_isolation() {
    struct OkGateway {
        commands: parking_lot::Mutex<Vec<MutationCommand>>,
    }

    #[async_trait]
    impl RemoteGateway for OkGateway {
        async fn bootstrap(&self) -> Result<RemoteState> {
            Ok(RemoteState::default())
        }

        async fn mutate(&self, command: MutationCommand) -> Result<()> {
            self.commands.lock().push(command);
            Ok(())
        }
    }

    let store = EntityStore::new();
    seed(&store);
    let gateway = Arc::new(OkGateway {
        commands: parking_lot::Mutex::new(Vec::new()),
    });
    let driver = driver_with(&store, gateway.clone());

    driver
        .execute(SetBubbleDescription::new("b1", "only the description"))
        .await
        .unwrap();

    // untouched fields stay untouched locally
    let bubble = store.bubble("b1").unwrap();
    assert_eq!(bubble.description, "only the description");
    assert_eq!(bubble.color_id, "c1");
    assert_eq!(bubble.size, BubbleSize::Medium);

    // and the update command carries only the changed field
    let commands = gateway.commands.lock().clone();
    assert_eq!(
        commands,
        vec![MutationCommand::UpdateBubble {
            id: "b1".into(),
            color_id: None,
            description: Some("only the description".into()),
            size: None,
        }]
    );
}
