/// Cascading color deletion tests
///
/// Deleting a color must repair every referencing bubble in the same
/// atomic effect (swap to an alternative color), refuse to run entirely
/// when no alternative exists, and undo exactly what it changed.
use async_trait::async_trait;
use bubbleboard::{
    ActionContext, AnyEntity, BlockingDriver, Bubble, BubbleArgs, BubbleSize, Color, ColorArgs,
    DeleteColor, EntityKind, EntityStore, KeyedLockManager, MutationCommand, Notifier,
    OptimisticDriver, RemoteGateway, RemoteState, Result, StoreError, Team, TeamArgs,
};
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

struct RecordingGateway {
    fail: AtomicBool,
    commands: parking_lot::Mutex<Vec<MutationCommand>>,
}

impl RecordingGateway {
    fn new(fail: bool) -> Self {
        Self {
            fail: AtomicBool::new(fail),
            commands: parking_lot::Mutex::new(Vec::new()),
        }
    }

    fn commands(&self) -> Vec<MutationCommand> {
        self.commands.lock().clone()
    }
}

#[async_trait]
impl RemoteGateway for RecordingGateway {
    async fn bootstrap(&self) -> Result<RemoteState> {
        Ok(RemoteState::default())
    }

    async fn mutate(&self, command: MutationCommand) -> Result<()> {
        self.commands.lock().push(command);
        if self.fail.load(Ordering::SeqCst) {
            Err(StoreError::RemoteMutationFailed("scripted failure".into()))
        } else {
            Ok(())
        }
    }
}

fn bubble(id: &str, color_id: &str) -> AnyEntity {
    AnyEntity::Bubble(Bubble::new(BubbleArgs {
        id: id.into(),
        team_id: "t1".into(),
        color_id: color_id.into(),
        created_at: Utc::now(),
        description: format!("bubble {id}"),
        size: BubbleSize::Small,
    }))
}

fn color(id: &str, name: &str) -> AnyEntity {
    AnyEntity::Color(Color::new(ColorArgs {
        id: id.into(),
        team_id: "t1".into(),
        name: name.into(),
        color: "#000000".into(),
    }))
}

fn team() -> AnyEntity {
    AnyEntity::Team(Team::new(TeamArgs {
        id: "t1".into(),
        name: "Private".into(),
    }))
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_deletion_with_alternative_swaps_and_confirms() {
    let store = EntityStore::new();
    store.add([team(), color("c1", "Lime"), color("c2", "Pink"), bubble("b1", "c1")]);
    let gateway = Arc::new(RecordingGateway::new(false));
    let ctx = ActionContext::new(store.clone(), gateway.clone(), Notifier::new());
    let driver = BlockingDriver::new(ctx, Arc::new(KeyedLockManager::new()));

    driver.execute(DeleteColor::new("c1")).await.unwrap();

    // the bubble now references the alternative and the color is gone
    assert_eq!(store.bubble("b1").unwrap().color_id, "c2");
    assert!(store.color("c1").is_err());
    assert_eq!(store.len(EntityKind::Color), 1);

    // and the remote command carried the chosen alternative
    assert_eq!(
        gateway.commands(),
        vec![MutationCommand::DeleteColor {
            id: "c1".into(),
            swap_id: "c2".into(),
        }]
    );
}

#[tokio::test]
async fn test_deletion_without_alternative_is_a_complete_noop() {
    let store = EntityStore::new();
    store.add([team(), color("c1", "Lonely"), bubble("b1", "c1")]);
    let gateway = Arc::new(RecordingGateway::new(false));
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();
    let ctx = ActionContext::new(store.clone(), gateway.clone(), notifier.clone());
    let driver = BlockingDriver::new(ctx, Arc::new(KeyedLockManager::new()));

    let version_before = store.version();
    driver.execute(DeleteColor::new("c1")).await.unwrap();

    // no store mutation, no remote call, no notification
    assert_eq!(store.version(), version_before);
    assert_eq!(store.bubble("b1").unwrap().color_id, "c1");
    assert!(store.color("c1").is_ok());
    assert!(gateway.commands().is_empty());
    assert!(notices.try_recv().is_err());
}

#[tokio::test]
async fn test_only_matching_bubbles_are_swapped() {
    let store = EntityStore::new();
    store.add([
        team(),
        color("c1", "Lime"),
        color("c2", "Pink"),
        bubble("b1", "c1"),
        bubble("b2", "c1"),
        bubble("b3", "c2"),
    ]);
    let gateway = Arc::new(RecordingGateway::new(false));
    let ctx = ActionContext::new(store.clone(), gateway.clone(), Notifier::new());
    let driver = BlockingDriver::new(ctx, Arc::new(KeyedLockManager::new()));

    driver.execute(DeleteColor::new("c1")).await.unwrap();

    assert_eq!(store.bubble("b1").unwrap().color_id, "c2");
    assert_eq!(store.bubble("b2").unwrap().color_id, "c2");
    assert_eq!(store.bubble("b3").unwrap().color_id, "c2");
    assert_eq!(store.len(EntityKind::Color), 1);
}

#[tokio::test]
async fn test_failed_deletion_restores_exactly_the_swapped_set() {
    let store = EntityStore::new();
    store.add([
        team(),
        color("c1", "Lime"),
        color("c2", "Pink"),
        bubble("b1", "c1"),
        bubble("b2", "c1"),
        bubble("b3", "c2"),
    ]);
    let gateway = Arc::new(RecordingGateway::new(true));
    let notifier = Notifier::new();
    let mut notices = notifier.subscribe();
    let ctx = ActionContext::new(store.clone(), gateway.clone(), notifier.clone());
    let driver = OptimisticDriver::new(ctx, Arc::new(KeyedLockManager::new()));

    driver.execute(DeleteColor::new("c1")).unwrap();
    settle().await;

    // the cascade was attempted remotely, then fully undone locally
    assert_eq!(gateway.commands().len(), 1);
    assert_eq!(notices.try_recv().unwrap().message, "Failed to delete the color");

    let restored = store.color("c1").unwrap();
    assert_eq!(restored.name, "Lime");
    assert_eq!(store.bubble("b1").unwrap().color_id, "c1");
    assert_eq!(store.bubble("b2").unwrap().color_id, "c1");
    // b3 never referenced c1 and must not be touched by the undo
    assert_eq!(store.bubble("b3").unwrap().color_id, "c2");
    assert_eq!(store.len(EntityKind::Color), 2);
}

#[tokio::test]
async fn test_keys_cover_the_cascade() {
    let store = EntityStore::new();
    store.add([
        team(),
        color("c1", "Lime"),
        color("c2", "Pink"),
        bubble("b1", "c1"),
        bubble("b2", "c2"),
    ]);
    let ctx = ActionContext::new(
        store.clone(),
        Arc::new(RecordingGateway::new(false)),
        Notifier::new(),
    );

    let action = DeleteColor::new("c1");
    let keys = bubbleboard::Action::keys(&action, &ctx);
    // target color first, then every bubble the cascade will touch
    assert_eq!(keys[0], "c1");
    assert!(keys.contains(&"b1".to_string()));
    assert!(!keys.contains(&"b2".to_string()));
    assert_eq!(keys.len(), 2);
}
