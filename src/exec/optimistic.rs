use super::{ActionStatus, unwind};
use crate::action::{Action, ActionContext};
use crate::core::{Result, StoreError};
use crate::lock::KeyedLockManager;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Apply-then-maybe-revert execution.
///
/// `execute` returns immediately; the mutation proceeds on a detached task.
/// Effects hit the store as they are produced, so the UI sees the outcome
/// before the remote authority has confirmed it. If the remote call fails,
/// the applied inverses unwind last-applied-first and the failure surfaces
/// only through the notification channel — never as an error to the
/// original caller.
pub struct OptimisticDriver {
    ctx: ActionContext,
    locks: Arc<KeyedLockManager>,
    status: watch::Sender<ActionStatus>,
}

impl OptimisticDriver {
    pub fn new(ctx: ActionContext, locks: Arc<KeyedLockManager>) -> Self {
        let (status, _) = watch::channel(ActionStatus::Idle);
        Self { ctx, locks, status }
    }

    pub fn status(&self) -> ActionStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<ActionStatus> {
        self.status.subscribe()
    }

    /// Start the action. Must be called within a tokio runtime.
    ///
    /// # Errors
    /// `NotIdle` if a previous invocation is still waiting for its locks.
    pub fn execute<A: Action>(&self, action: A) -> Result<()> {
        if !self.status().is_idle() {
            return Err(StoreError::NotIdle);
        }
        let keys = action.keys(&self.ctx);
        let ctx = self.ctx.clone();
        let locks = self.locks.clone();
        let status = self.status.clone();
        tokio::spawn(async move {
            // queued is only surfaced when the locks are not immediately free
            let _guard = match locks.try_acquire(&keys) {
                Some(guard) => guard,
                None => {
                    status.send_replace(ActionStatus::Queued);
                    locks.acquire(&keys).await
                }
            };
            status.send_replace(ActionStatus::Idle);
            run(&ctx, &action).await;
        });
        Ok(())
    }
}

async fn run<A: Action>(ctx: &ActionContext, action: &A) {
    let plan = match action.plan(ctx) {
        Ok(plan) => plan,
        Err(error) => {
            warn!(action = action.id(), %error, "planning failed");
            return;
        }
    };
    let (effects, command, failure_notice) = plan.into_parts();

    let mut applied = Vec::new();
    for effect in effects {
        match effect.apply(ctx) {
            Ok(Some(inverse)) => applied.push(inverse),
            Ok(None) => {}
            Err(error) => {
                warn!(action = action.id(), %error, "local effect failed, rolling back");
                unwind(ctx, applied);
                return;
            }
        }
    }

    let Some(command) = command else { return };
    if let Err(error) = ctx.gateway().mutate(command).await {
        debug!(action = action.id(), %error, "remote confirmation failed, rolling back");
        if let Some(notice) = failure_notice {
            ctx.notifier().error(notice);
        }
        unwind(ctx, applied);
    }
}
