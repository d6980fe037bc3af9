//! Page controller.
//!
//! Owns one instance of each piece of page state and exposes the actions
//! the markup binds to. The host calls [`PageController::mount`] when the
//! page becomes interactive and [`PageController::unmount`] when it goes
//! away; everything else is user input.
//!
//! LIFECYCLE
//! =========
//! `mount` re-applies the theme, opens the disclaimer if consent is missing
//! and runs the initial count read. `unmount` silently aborts whichever
//! count read is in flight (the mount read or a post-submit refresh),
//! refuses further reads and drops any pending status.

use std::sync::Arc;

use crate::config::ClientConfig;
use crate::net::api::AggregateClient;
use crate::net::transport::Transport;
use crate::state::consent::ConsentGate;
use crate::state::count::WordCount;
use crate::state::status::{Status, StatusNotifier};
use crate::state::submission::{Phase, SubmissionPipeline, SubmitOutcome};
use crate::state::theme::{Theme, ThemeController, ThemeSurface};
use crate::storage::PreferenceStore;
use crate::util::severity::{self, SeverityBand};

/// Everything the markup needs for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub total_words: u64,
    pub status: Option<Status>,
    pub theme: Theme,
    pub disclaimer_visible: bool,
    pub input: String,
    pub severity: u8,
    pub severity_band: SeverityBand,
    pub submitting: bool,
    pub can_submit: bool,
}

#[derive(Clone, Debug)]
pub struct PageController {
    config: ClientConfig,
    notifier: StatusNotifier,
    gate: ConsentGate,
    theme: ThemeController,
    count: WordCount,
    pipeline: SubmissionPipeline,
}

impl PageController {
    pub fn new(
        config: ClientConfig,
        store: PreferenceStore,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn ThemeSurface>,
    ) -> Self {
        let notifier = StatusNotifier::new();
        let client = AggregateClient::new(config.clone(), transport);
        let gate = ConsentGate::new(store.clone(), notifier.clone());
        let theme = ThemeController::new(store, surface);
        let count = WordCount::new(client.clone(), notifier.clone());
        let pipeline = SubmissionPipeline::new(client, gate.clone(), count.clone(), notifier.clone());
        Self { config, notifier, gate, theme, count, pipeline }
    }

    /// Native wiring: reqwest, file-backed (or in-memory) preferences.
    ///
    /// # Errors
    ///
    /// Returns [`crate::net::transport::TransportError`] if the HTTP client cannot be built.
    #[cfg(not(feature = "hydrate"))]
    pub fn native(config: ClientConfig) -> Result<Self, crate::net::transport::TransportError> {
        let transport = crate::net::transport::ReqwestTransport::new(config.timeouts)?;
        let store = match &config.prefs_path {
            Some(path) => PreferenceStore::new(crate::storage::FileBackend::new(path)),
            None => PreferenceStore::in_memory(),
        };
        Ok(Self::new(config, store, Arc::new(transport), Arc::new(crate::util::dark_mode::DocumentRoot)))
    }

    /// Browser wiring: `fetch`, `localStorage`, `<html>` class.
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn browser(config: ClientConfig) -> Self {
        let transport = crate::net::transport::GlooTransport::new(config.timeouts);
        let store = PreferenceStore::new(crate::storage::WebStorageBackend);
        Self::new(config, store, Arc::new(transport), Arc::new(crate::util::dark_mode::DocumentRoot))
    }

    // =========================================================================
    // LIFECYCLE
    // =========================================================================

    /// Make the page interactive and load the initial count.
    ///
    /// Resolves when the initial read finishes, is superseded by a newer read,
    /// or is aborted by [`Self::unmount`].
    pub async fn mount(&self) {
        self.theme.mount();
        self.gate.on_interactive();
        self.count.open();

        match self.count.load().await {
            Ok(total) => tracing::debug!(total, "initial count loaded"),
            Err(e) if e.is_aborted() => tracing::debug!("initial count read cancelled"),
            Err(_) => {}
        }
    }

    /// Cancel any in-flight count read and drop any pending status.
    pub fn unmount(&self) {
        self.count.close();
        self.notifier.clear();
    }

    // =========================================================================
    // ACTIONS
    // =========================================================================

    pub fn accept_disclaimer(&self) {
        self.gate.accept();
    }

    pub fn toggle_theme(&self) -> Theme {
        self.theme.toggle()
    }

    pub fn set_input(&self, input: impl Into<String>) {
        self.pipeline.set_input(input);
    }

    pub fn set_severity(&self, value: i64) -> u8 {
        self.pipeline.set_severity(value)
    }

    /// Submit the current input (button click or Enter).
    pub async fn submit(&self) -> SubmitOutcome {
        self.pipeline.submit().await
    }

    // =========================================================================
    // VIEW
    // =========================================================================

    #[must_use]
    pub fn can_submit(&self) -> bool {
        self.pipeline.can_submit()
    }

    #[must_use]
    pub fn csv_download_url(&self) -> String {
        self.config.csv_download_url()
    }

    #[must_use]
    pub fn snapshot(&self) -> ViewState {
        let severity = self.pipeline.severity();
        ViewState {
            total_words: self.count.total(),
            status: self.notifier.current(),
            theme: self.theme.current(),
            disclaimer_visible: self.gate.disclaimer_visible(),
            input: self.pipeline.input(),
            severity,
            severity_band: severity::band(severity),
            submitting: self.pipeline.phase() == Phase::Submitting,
            can_submit: self.pipeline.can_submit(),
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
