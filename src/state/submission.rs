//! Submission pipeline.
//!
//! `Idle -> Submitting -> Idle`. A submit passes the consent gate, then the
//! in-flight check, then input validation, and only then calls the API.
//! After a confirmed create the input is cleared and the count refreshed
//! before the success status. A failed refresh raises its own error status
//! first; a cancelled one (page torn down) suppresses the success status.
//! On a create failure the input is kept and one error status is raised.
//! No retries.
//!
//! The phase always returns to `Idle`, even if the submit future is dropped
//! mid-request.

use std::sync::{Arc, Mutex};

use super::consent::ConsentGate;
use super::count::WordCount;
use super::lock;
use super::status::{FEEDBACK_DURATION, StatusKind, StatusNotifier};
use crate::net::api::AggregateClient;
use crate::net::types::{ApiFailure, SubmissionRequest, ValidationError};
use crate::util::severity;

pub const SUBMIT_SUCCESS_MESSAGE: &str = "So'z muvaffaqiyatli qo'shildi";
pub const SUBMIT_GENERIC_ERROR_MESSAGE: &str = "Xatolik juqildi";
pub const SUBMIT_NETWORK_ERROR_MESSAGE: &str = "Tarmoq xatosi. Qayta urinib ko'ring.";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Submitting,
}

/// Result of one [`SubmissionPipeline::submit`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created. `total` is the refreshed count, if the refresh succeeded.
    Added { total: Option<u64> },
    /// Refused before any network call.
    Rejected(ValidationError),
    /// Another submission is still in flight.
    Busy,
    /// The create call failed.
    Failed(ApiFailure),
}

#[derive(Debug)]
struct Form {
    input: String,
    severity: u8,
    phase: Phase,
}

impl Default for Form {
    fn default() -> Self {
        Self { input: String::new(), severity: severity::DEFAULT, phase: Phase::Idle }
    }
}

/// Puts the form back to `Idle` when the in-flight submit ends, however it ends.
struct InFlight<'a> {
    form: &'a Mutex<Form>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.form).phase = Phase::Idle;
    }
}

#[derive(Clone, Debug)]
pub struct SubmissionPipeline {
    client: AggregateClient,
    gate: ConsentGate,
    count: WordCount,
    notifier: StatusNotifier,
    form: Arc<Mutex<Form>>,
}

impl SubmissionPipeline {
    pub fn new(client: AggregateClient, gate: ConsentGate, count: WordCount, notifier: StatusNotifier) -> Self {
        Self { client, gate, count, notifier, form: Arc::new(Mutex::new(Form::default())) }
    }

    pub fn set_input(&self, input: impl Into<String>) {
        lock(&self.form).input = input.into();
    }

    #[must_use]
    pub fn input(&self) -> String {
        lock(&self.form).input.clone()
    }

    /// Set the severity, pinned into `1..=100`. Returns the stored value.
    pub fn set_severity(&self, value: i64) -> u8 {
        let pinned = severity::clamp(value);
        lock(&self.form).severity = pinned;
        pinned
    }

    #[must_use]
    pub fn severity(&self) -> u8 {
        lock(&self.form).severity
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        lock(&self.form).phase
    }

    /// Whether the submit control is enabled: non-blank input and idle.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        let form = lock(&self.form);
        form.phase == Phase::Idle && !form.input.trim().is_empty()
    }

    /// Run one submission attempt from the current form.
    pub async fn submit(&self) -> SubmitOutcome {
        if !self.gate.require_open_or_notify() {
            return SubmitOutcome::Rejected(ValidationError::ConsentRequired);
        }

        let request = {
            let mut form = lock(&self.form);
            if form.phase == Phase::Submitting {
                return SubmitOutcome::Busy;
            }
            match SubmissionRequest::new(&form.input, i64::from(form.severity)) {
                Ok(request) => {
                    form.phase = Phase::Submitting;
                    request
                }
                Err(e) => return SubmitOutcome::Rejected(e),
            }
        };
        let _in_flight = InFlight { form: &self.form };

        match self.client.submit(&request).await {
            Ok(()) => {
                tracing::info!(word = %request.word, severity = request.severity, "word submitted");
                lock(&self.form).input.clear();
                match self.count.load().await {
                    Err(ApiFailure::Aborted) => {
                        tracing::debug!("count refresh cancelled; success status skipped");
                        SubmitOutcome::Added { total: None }
                    }
                    refreshed => {
                        self.notifier.show(SUBMIT_SUCCESS_MESSAGE, StatusKind::Success, FEEDBACK_DURATION);
                        SubmitOutcome::Added { total: refreshed.ok() }
                    }
                }
            }
            Err(failure) => {
                if let Some(message) = submit_failure_message(&failure) {
                    self.notifier.show(message, StatusKind::Error, FEEDBACK_DURATION);
                }
                SubmitOutcome::Failed(failure)
            }
        }
    }
}

/// User-facing text for a failed create; `None` for cancellation.
#[must_use]
pub fn submit_failure_message(failure: &ApiFailure) -> Option<String> {
    match failure {
        ApiFailure::Aborted => None,
        ApiFailure::Network(_) => Some(SUBMIT_NETWORK_ERROR_MESSAGE.to_string()),
        ApiFailure::BadResponse(_) => Some(SUBMIT_GENERIC_ERROR_MESSAGE.to_string()),
        ApiFailure::Api { message, .. } => {
            Some(message.clone().unwrap_or_else(|| SUBMIT_GENERIC_ERROR_MESSAGE.to_string()))
        }
    }
}

#[cfg(test)]
#[path = "submission_test.rs"]
mod tests;
