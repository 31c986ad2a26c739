//! Trailing debounce with latest-wins semantics.
//!
//! Rapid input (search keystrokes, resize events) schedules derived-state
//! recomputation far faster than it is worth running. [`UpdateScheduler`]
//! coalesces those bursts: at most one update executes per interval, and it
//! is always the most recently scheduled one — a newer request discards the
//! pending one outright instead of queueing behind it.
//!
//! Built on tokio time, so tests drive it deterministically with
//! `#[tokio::test(start_paused = true)]` and `tokio::time::advance`.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Reference rate limit: one update per second.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

// ============================================================================
// Update Scheduler
// ============================================================================

/// Rate-limits updates to one per interval while preserving the latest
/// request.
///
/// - If the interval has elapsed since the last firing, the update runs
///   immediately on the calling task.
/// - Otherwise the update is deferred to `interval - elapsed` from the last
///   firing, replacing any still-pending update. Only one pending timer ever
///   exists, so no ordering races are possible: last writer wins.
///
/// The interval starts at construction — a burst right after `new` is
/// coalesced to its latest update just like any later burst; nothing runs
/// until the first interval boundary.
///
/// Dropping the scheduler cancels any pending update.
pub struct UpdateScheduler {
    interval: Duration,
    last_fire: Arc<Mutex<Instant>>,
    pending: Option<JoinHandle<()>>,
}

impl UpdateScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: Arc::new(Mutex::new(Instant::now())),
            pending: None,
        }
    }

    /// Schedule `update` to run under the rate limit, replacing any pending
    /// update from an earlier call.
    pub fn schedule<F>(&mut self, update: F)
    where
        F: FnOnce() + Send + 'static,
    {
        // Latest wins: a still-pending update is discarded, not queued.
        self.cancel();

        let now = Instant::now();
        let elapsed = now - lock(&self.last_fire);

        if elapsed < self.interval {
            let delay = self.interval - elapsed;
            let last_fire = self.last_fire.clone();
            tracing::debug!(?delay, "Deferring update");

            self.pending = Some(tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                update();
                set_lock(&last_fire, Instant::now());
            }));
        } else {
            update();
            set_lock(&self.last_fire, now);
        }
    }

    /// Drop any pending update without firing it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }

    /// True while a deferred update is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }
}

impl Drop for UpdateScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn lock(slot: &Mutex<Instant>) -> Instant {
    *slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn set_lock(slot: &Mutex<Instant>, value: Instant) {
    *slot.lock().unwrap_or_else(PoisonError::into_inner) = value;
}
