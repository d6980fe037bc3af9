//! Displayed aggregate word count.
//!
//! Every read (the mount read and the refresh after a confirmed write)
//! goes through [`WordCount::load`]: cancellable, and every non-cancelled
//! failure becomes exactly one error status.
//!
//! ORDERING
//! ========
//! Reads are numbered. Starting a read aborts the one still in flight, and
//! only the newest read may commit its total or raise a status, so a slow
//! read can never land over a newer one. [`WordCount::close`] cancels the
//! pending read and refuses new ones until [`WordCount::open`].

use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, AbortRegistration};

use super::lock;
use super::status::{FEEDBACK_DURATION, StatusKind, StatusNotifier};
use crate::net::api::AggregateClient;
use crate::net::types::ApiFailure;

pub const COUNT_BAD_RESPONSE_MESSAGE: &str = "Server returned unexpected response when fetching count";
pub const COUNT_API_ERROR_MESSAGE: &str = "Failed to fetch words";
pub const COUNT_NETWORK_MESSAGE: &str = "Could not fetch total words";

#[derive(Debug, Default)]
struct Reads {
    total: u64,
    latest: u64,
    pending: Option<AbortHandle>,
    closed: bool,
}

#[derive(Clone, Debug)]
pub struct WordCount {
    client: AggregateClient,
    notifier: StatusNotifier,
    reads: Arc<Mutex<Reads>>,
}

impl WordCount {
    pub fn new(client: AggregateClient, notifier: StatusNotifier) -> Self {
        Self { client, notifier, reads: Arc::new(Mutex::new(Reads::default())) }
    }

    /// Last total received from the server; 0 until the first success.
    #[must_use]
    pub fn total(&self) -> u64 {
        lock(&self.reads).total
    }

    /// Fetch the count, surfacing failures as a status.
    ///
    /// Supersedes any read still in flight. Cancelled or superseded reads
    /// resolve to [`ApiFailure::Aborted`] and stay silent.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiFailure`] after it has been reported.
    pub async fn load(&self) -> Result<u64, ApiFailure> {
        let Some((seq, registration)) = self.begin() else {
            tracing::debug!("count read refused; page is closed");
            return Err(ApiFailure::Aborted);
        };

        let result = self.client.fetch_count(Some(registration)).await;
        let result = self.finish(seq, result);

        if let Err(failure) = &result {
            if let Some(message) = count_failure_message(failure) {
                self.notifier.show(message, StatusKind::Error, FEEDBACK_DURATION);
            }
        }
        result
    }

    /// Allow reads again after [`Self::close`].
    pub fn open(&self) {
        lock(&self.reads).closed = false;
    }

    /// Abort the read in flight and refuse new ones.
    pub fn close(&self) {
        let mut reads = lock(&self.reads);
        reads.closed = true;
        reads.latest += 1;
        if let Some(pending) = reads.pending.take() {
            pending.abort();
        }
    }

    fn begin(&self) -> Option<(u64, AbortRegistration)> {
        let mut reads = lock(&self.reads);
        if reads.closed {
            return None;
        }
        if let Some(previous) = reads.pending.take() {
            previous.abort();
        }
        let (handle, registration) = AbortHandle::new_pair();
        reads.latest += 1;
        reads.pending = Some(handle);
        Some((reads.latest, registration))
    }

    fn finish(&self, seq: u64, result: Result<u64, ApiFailure>) -> Result<u64, ApiFailure> {
        let mut reads = lock(&self.reads);
        if reads.latest != seq {
            tracing::debug!(seq, latest = reads.latest, "stale count read discarded");
            return Err(ApiFailure::Aborted);
        }
        reads.pending = None;
        if let Ok(total) = result {
            reads.total = total;
        }
        result
    }
}

/// User-facing text for a failed count read; `None` for cancellation.
#[must_use]
pub fn count_failure_message(failure: &ApiFailure) -> Option<String> {
    match failure {
        ApiFailure::Aborted => None,
        ApiFailure::Network(_) => Some(COUNT_NETWORK_MESSAGE.to_string()),
        ApiFailure::BadResponse(_) => Some(COUNT_BAD_RESPONSE_MESSAGE.to_string()),
        ApiFailure::Api { message, .. } => Some(message.clone().unwrap_or_else(|| COUNT_API_ERROR_MESSAGE.to_string())),
    }
}

#[cfg(test)]
#[path = "count_test.rs"]
mod tests;
