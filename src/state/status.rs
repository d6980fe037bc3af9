//! Ephemeral status notifier.
//!
//! One status slot for the whole page. Each status carries its own expiry
//! timer; showing a new status aborts the pending timer before arming a
//! fresh one, so at most one expiry is ever pending and the newest status
//! always wins.

use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use futures::future::AbortHandle;

use super::lock;
use crate::runtime;

/// Lifetime of a confirmation (e.g. disclaimer accepted).
pub const CONFIRMATION_DURATION: Duration = Duration::from_millis(2500);
/// Lifetime of operation feedback (submit results, errors).
pub const FEEDBACK_DURATION: Duration = Duration::from_millis(3500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    pub message: String,
    pub kind: StatusKind,
}

#[derive(Default)]
struct Slot {
    current: Option<Status>,
    timer: Option<AbortHandle>,
    /// Bumped on every show/clear; a timer only clears its own generation.
    generation: u64,
}

impl Slot {
    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

/// Shared handle to the page's status slot.
///
/// Natively, [`StatusNotifier::show`] must be called inside a `tokio` runtime.
#[derive(Clone, Default)]
pub struct StatusNotifier {
    slot: Arc<Mutex<Slot>>,
}

impl StatusNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current status and arm its expiry.
    pub fn show(&self, message: impl Into<String>, kind: StatusKind, duration: Duration) {
        let status = Status { message: message.into(), kind };
        tracing::debug!(kind = ?status.kind, message = %status.message, "status shown");

        let mut slot = lock(&self.slot);
        slot.cancel_timer();
        slot.generation += 1;
        slot.current = Some(status);
        slot.timer = Some(runtime::spawn_abortable(expire_after(Arc::downgrade(&self.slot), slot.generation, duration)));
    }

    /// Drop the current status and its pending expiry.
    pub fn clear(&self) {
        let mut slot = lock(&self.slot);
        slot.cancel_timer();
        slot.generation += 1;
        slot.current = None;
    }

    #[must_use]
    pub fn current(&self) -> Option<Status> {
        lock(&self.slot).current.clone()
    }

    /// Whether an expiry timer is armed.
    #[must_use]
    pub fn has_pending_expiry(&self) -> bool {
        lock(&self.slot).timer.is_some()
    }
}

impl std::fmt::Debug for StatusNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusNotifier").field("current", &self.current()).finish()
    }
}

async fn expire_after(slot: Weak<Mutex<Slot>>, generation: u64, duration: Duration) {
    runtime::sleep(duration).await;
    let Some(slot) = slot.upgrade() else {
        return;
    };
    let mut slot = lock(&slot);
    if slot.generation == generation {
        slot.current = None;
        slot.timer = None;
    }
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
