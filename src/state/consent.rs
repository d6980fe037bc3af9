//! Consent gate for the write path.
//!
//! Writes stay closed until the visitor accepts the content disclaimer. The
//! acceptance lives only in the preference store (`disclaimerAccepted` =
//! `"true"`), is set only by [`ConsentGate::accept`] and never expires.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use super::status::{CONFIRMATION_DURATION, FEEDBACK_DURATION, StatusKind, StatusNotifier};
use crate::storage::{CONSENT_KEY, PreferenceStore};

pub const CONSENT_REQUIRED_MESSAGE: &str = "Please accept the disclaimer before adding words.";
pub const CONSENT_ACCEPTED_MESSAGE: &str = "Thanks, disclaimer accepted";

const ACCEPTED_SENTINEL: &str = "true";

#[derive(Clone, Debug)]
pub struct ConsentGate {
    store: PreferenceStore,
    notifier: StatusNotifier,
    /// Whether the modal disclaimer is on screen. Hidden until the page is
    /// interactive so server-rendered markup never shows it.
    disclaimer_visible: Arc<AtomicBool>,
}

impl ConsentGate {
    pub fn new(store: PreferenceStore, notifier: StatusNotifier) -> Self {
        Self { store, notifier, disclaimer_visible: Arc::new(AtomicBool::new(false)) }
    }

    /// `true` only if the disclaimer was explicitly accepted.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.store.get(CONSENT_KEY).as_deref() == Some(ACCEPTED_SENTINEL)
    }

    /// Check the gate before a guarded action.
    ///
    /// When closed, raises an error status; the caller must abort on `false`.
    pub fn require_open_or_notify(&self) -> bool {
        if self.is_open() {
            return true;
        }
        tracing::debug!("write blocked until disclaimer is accepted");
        self.notifier.show(CONSENT_REQUIRED_MESSAGE, StatusKind::Error, FEEDBACK_DURATION);
        false
    }

    /// Record acceptance, close the disclaimer and confirm to the visitor.
    pub fn accept(&self) {
        self.store.set(CONSENT_KEY, ACCEPTED_SENTINEL);
        self.disclaimer_visible.store(false, Ordering::SeqCst);
        tracing::info!("disclaimer accepted");
        self.notifier.show(CONSENT_ACCEPTED_MESSAGE, StatusKind::Info, CONFIRMATION_DURATION);
    }

    /// Called once the page becomes interactive: show the disclaimer if closed.
    pub fn on_interactive(&self) {
        self.disclaimer_visible.store(!self.is_open(), Ordering::SeqCst);
    }

    /// Whether the modal disclaimer currently intercepts page interaction.
    #[must_use]
    pub fn disclaimer_visible(&self) -> bool {
        self.disclaimer_visible.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
#[path = "consent_test.rs"]
mod tests;
