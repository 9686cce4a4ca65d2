use super::{ActionStatus, unwind};
use crate::action::{Action, ActionContext};
use crate::core::{Result, StoreError};
use crate::lock::KeyedLockManager;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::warn;

/// Buffer-then-commit execution.
///
/// Effects are buffered unapplied while the remote call is in flight; only
/// after it succeeds do they hit the store, in production order. A failed
/// remote call therefore never leaves any local trace. The caller awaits
/// full completion, and only one invocation may be in flight per driver.
pub struct BlockingDriver {
    ctx: ActionContext,
    locks: Arc<KeyedLockManager>,
    status: watch::Sender<ActionStatus>,
}

impl BlockingDriver {
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

    /// Run the action to completion.
    ///
    /// # Errors
    /// `NotIdle` if an invocation is already in flight;
    /// `RemoteMutationFailed` if the remote authority rejected the mutation
    /// (the store is untouched in that case).
    pub async fn execute<A: Action>(&self, action: A) -> Result<()> {
        let entered = self.status.send_if_modified(|status| {
            if status.is_idle() {
                *status = ActionStatus::Queued;
                true
            } else {
                false
            }
        });
        if !entered {
            return Err(StoreError::NotIdle);
        }

        let result = self.run(&action).await;
        self.status.send_replace(ActionStatus::Idle);
        result
    }

    async fn run<A: Action>(&self, action: &A) -> Result<()> {
        let keys = action.keys(&self.ctx);
        let _guard = match self.locks.try_acquire(&keys) {
            Some(guard) => guard,
            None => self.locks.acquire(&keys).await,
        };
        self.status.send_replace(ActionStatus::Executing);

        let plan = action.plan(&self.ctx)?;
        let (effects, command, failure_notice) = plan.into_parts();

        if let Some(command) = command {
            if let Err(error) = self.ctx.gateway().mutate(command).await {
                if let Some(notice) = failure_notice {
                    self.ctx.notifier().error(notice);
                }
                return Err(error);
            }
        }

        // remote side confirmed; commit the buffered effects
        let mut applied = Vec::new();
        for effect in effects {
            match effect.apply(&self.ctx) {
                Ok(Some(inverse)) => applied.push(inverse),
                Ok(None) => {}
                Err(error) => {
                    warn!(action = action.id(), %error, "commit failed mid-apply, rolling back");
                    unwind(&self.ctx, applied);
                    return Err(error);
                }
            }
        }
        Ok(())
    }
}
