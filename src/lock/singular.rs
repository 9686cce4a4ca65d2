use parking_lot::Mutex;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::oneshot;

struct LockState {
    held: bool,
    waiters: VecDeque<oneshot::Sender<()>>,
}

/// Binary mutual-exclusion lock with a FIFO wait queue.
///
/// Release hands the lock directly to the next queued waiter, so waiters
/// resume strictly in arrival order and the lock is never observably free
/// while someone is queued. Waiters whose futures were dropped while queued
/// are skipped.
pub struct SingularLock {
    state: Mutex<LockState>,
}

impl SingularLock {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LockState {
                held: false,
                waiters: VecDeque::new(),
            }),
        }
    }

    pub fn locked(&self) -> bool {
        self.state.lock().held
    }

    /// Take the lock if it is free right now, without queuing.
    pub(crate) fn try_acquire_raw(&self) -> bool {
        let mut state = self.state.lock();
        if state.held {
            false
        } else {
            state.held = true;
            true
        }
    }

    /// Suspend until the lock is ours. Pair with `release_raw`.
    pub(crate) async fn acquire_raw(&self) {
        loop {
            let rx = {
                let mut state = self.state.lock();
                if !state.held {
                    state.held = true;
                    return;
                }
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                rx
            };
            // A successful recv means the releaser handed the lock to us.
            if rx.await.is_ok() {
                return;
            }
        }
    }

    pub(crate) fn release_raw(&self) {
        let mut state = self.state.lock();
        loop {
            match state.waiters.pop_front() {
                // hand-off: the lock stays held, ownership moves to the waiter
                Some(waiter) => {
                    if waiter.send(()).is_ok() {
                        return;
                    }
                    // that waiter is gone; try the next one
                }
                None => {
                    state.held = false;
                    return;
                }
            }
        }
    }

    /// Run `fut` while holding the lock.
    pub async fn with_lock<T>(&self, fut: impl Future<Output = T>) -> T {
        self.acquire_raw().await;
        let _release = ReleaseOnDrop { lock: self };
        fut.await
    }
}

impl Default for SingularLock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SingularLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("SingularLock")
            .field("held", &state.held)
            .field("waiters", &state.waiters.len())
            .finish()
    }
}

struct ReleaseOnDrop<'a> {
    lock: &'a SingularLock,
}

impl Drop for ReleaseOnDrop<'_> {
    fn drop(&mut self) {
        self.lock.release_raw();
    }
}
