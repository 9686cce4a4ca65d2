use super::{MutationCommand, RemoteBubble, RemoteColor, RemoteGateway, RemoteState, RemoteTeam};
use crate::core::{BubbleSize, Result, StoreError};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

/// Configuration for the in-memory gateway.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Simulated network latency applied to every call.
    pub latency: Duration,
}

impl GatewayConfig {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(200),
        }
    }

    /// Set the simulated latency. Tests typically use `Duration::ZERO`.
    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// In-process implementation of the remote authority.
///
/// Holds the nested authoritative state behind an async lock, applies
/// commands with the same field-merge semantics as the real backend, and
/// can emulate mutation failures behind a runtime toggle. While the toggle
/// is on every mutation is rejected, which keeps failure tests
/// deterministic.
pub struct MemoryGateway {
    state: RwLock<RemoteState>,
    config: GatewayConfig,
    emulate_errors: AtomicBool,
}

impl MemoryGateway {
    /// Gateway seeded with the default first-run state.
    pub fn new() -> Self {
        Self::from_state(default_state(), GatewayConfig::new())
    }

    pub fn with_config(config: GatewayConfig) -> Self {
        Self::from_state(default_state(), config)
    }

    pub fn from_state(state: RemoteState, config: GatewayConfig) -> Self {
        Self {
            state: RwLock::new(state),
            config,
            emulate_errors: AtomicBool::new(false),
        }
    }

    /// Toggle emulated mutation failures.
    pub fn set_emulated_errors(&self, emulate: bool) {
        self.emulate_errors.store(emulate, Ordering::SeqCst);
    }

    pub fn emulated_errors(&self) -> bool {
        self.emulate_errors.load(Ordering::SeqCst)
    }

    /// Snapshot of the current authoritative state, for inspection.
    pub async fn state(&self) -> RemoteState {
        self.state.read().await.clone()
    }

    async fn sleep_latency(&self) {
        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteGateway for MemoryGateway {
    async fn bootstrap(&self) -> Result<RemoteState> {
        self.sleep_latency().await;
        Ok(self.state.read().await.clone())
    }

    async fn mutate(&self, command: MutationCommand) -> Result<()> {
        debug!(kind = command.kind(), "applying mutation");
        self.sleep_latency().await;

        if self.emulated_errors() {
            debug!(kind = command.kind(), "emulated mutation failure");
            return Err(StoreError::RemoteMutationFailed(
                "emulated network error".to_string(),
            ));
        }

        let mut state = self.state.write().await;
        apply(&mut state, command);
        Ok(())
    }
}

/// Apply one command to the nested state. Unknown targets are ignored, the
/// same forgiving behavior the real backend exhibits.
fn apply(state: &mut RemoteState, command: MutationCommand) {
    match command {
        MutationCommand::CreateBubble {
            id,
            team_id,
            color_id,
            created_at,
            description,
            size,
        } => {
            if let Some(team) = state.teams.iter_mut().find(|team| team.id == team_id) {
                team.bubbles.push(RemoteBubble {
                    id,
                    color_id,
                    created_at,
                    description,
                    size,
                });
            }
        }
        MutationCommand::CreateColor {
            id,
            team_id,
            name,
            color,
        } => {
            if let Some(team) = state.teams.iter_mut().find(|team| team.id == team_id) {
                team.colors.push(RemoteColor { id, name, color });
            }
        }
        MutationCommand::DeleteBubble { id } => {
            if let Some(team) = state
                .teams
                .iter_mut()
                .find(|team| team.bubbles.iter().any(|bubble| bubble.id == id))
            {
                team.bubbles.retain(|bubble| bubble.id != id);
            }
        }
        MutationCommand::DeleteColor { id, swap_id } => {
            if let Some(team) = state
                .teams
                .iter_mut()
                .find(|team| team.colors.iter().any(|color| color.id == id))
            {
                team.colors.retain(|color| color.id != id);
                for bubble in &mut team.bubbles {
                    if bubble.color_id == id {
                        bubble.color_id = swap_id.clone();
                    }
                }
            }
        }
        MutationCommand::UpdateBubble {
            id,
            color_id,
            description,
            size,
        } => {
            if let Some(bubble) = state
                .teams
                .iter_mut()
                .flat_map(|team| team.bubbles.iter_mut())
                .find(|bubble| bubble.id == id)
            {
                if let Some(color_id) = color_id {
                    bubble.color_id = color_id;
                }
                if let Some(description) = description {
                    bubble.description = description;
                }
                if let Some(size) = size {
                    bubble.size = size;
                }
            }
        }
        MutationCommand::UpdateColor { id, name, color } => {
            if let Some(remote_color) = state
                .teams
                .iter_mut()
                .flat_map(|team| team.colors.iter_mut())
                .find(|remote_color| remote_color.id == id)
            {
                if let Some(name) = name {
                    remote_color.name = name;
                }
                if let Some(color) = color {
                    remote_color.color = color;
                }
            }
        }
    }
}

/// First-run state: one private team with three colors and two bubbles.
fn default_state() -> RemoteState {
    let team_id = Uuid::new_v4().to_string();
    let lime_id = Uuid::new_v4().to_string();
    let yellow_id = Uuid::new_v4().to_string();
    let pink_id = Uuid::new_v4().to_string();

    RemoteState {
        teams: vec![RemoteTeam {
            id: team_id,
            name: "Private".to_string(),
            colors: vec![
                RemoteColor {
                    id: lime_id.clone(),
                    name: "Mojito Minuet".to_string(),
                    color: "#44ff00".to_string(),
                },
                RemoteColor {
                    id: yellow_id,
                    name: "Buttercream Bliss".to_string(),
                    color: "#ffffaa".to_string(),
                },
                RemoteColor {
                    id: pink_id.clone(),
                    name: "Bubblegum Ballet".to_string(),
                    color: "#fc3096".to_string(),
                },
            ],
            bubbles: vec![
                RemoteBubble {
                    id: Uuid::new_v4().to_string(),
                    color_id: pink_id,
                    created_at: Utc.with_ymd_and_hms(2023, 9, 21, 10, 20, 0)
                        .single()
                        .unwrap_or_else(Utc::now),
                    description: "Dancing on a cloud of cotton candy thoughts. 💭".to_string(),
                    size: BubbleSize::Medium,
                },
                RemoteBubble {
                    id: Uuid::new_v4().to_string(),
                    color_id: lime_id,
                    created_at: Utc.with_ymd_and_hms(2023, 9, 22, 12, 17, 0)
                        .single()
                        .unwrap_or_else(Utc::now),
                    description: "Swaying to the rhythm of zesty dreams and minty moods. 🍃"
                        .to_string(),
                    size: BubbleSize::Large,
                },
            ],
        }],
    }
}
