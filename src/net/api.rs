//! Remote aggregate client.
//!
//! Two operations against the word collection: a paginated read (used for
//! the total count) and a single-item create. Classification of every
//! response lives in the pure `parse_*` functions for testability.
//!
//! ERROR HANDLING
//! ==============
//! Every outcome becomes `Ok` or an [`ApiFailure`]; nothing panics and no
//! other component's state is touched. Reads accept an optional
//! [`AbortRegistration`]; cancelling it yields [`ApiFailure::Aborted`].

use std::sync::Arc;

use futures::future::{AbortRegistration, Abortable};
use serde_json::Value;

use super::transport::{RawResponse, Transport, TransportError};
use super::types::{AggregatePage, ApiFailure, SubmissionRequest};
use crate::config::ClientConfig;

#[derive(Clone)]
pub struct AggregateClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl AggregateClient {
    pub fn new(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { transport, config }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read one page of the collection.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure`] classified by [`parse_page`], or
    /// [`ApiFailure::Aborted`] if `abort` fired first.
    pub async fn fetch_page(&self, page: u32, abort: Option<AbortRegistration>) -> Result<AggregatePage, ApiFailure> {
        let url = self.config.page_url(page);
        tracing::debug!(%url, "fetching collection page");

        let request = self.transport.get(&url);
        let outcome = match abort {
            Some(registration) => Abortable::new(request, registration)
                .await
                .map_err(|_| ApiFailure::Aborted)?,
            None => request.await,
        };
        let response = outcome.map_err(network_failure)?;

        let page = parse_page(&response).inspect_err(|e| log_failure("fetch_page", e))?;
        if !page.is_consistent() {
            tracing::debug!(
                total_items = page.total_items,
                total_pages = page.total_pages,
                current_page = page.current_page,
                "collection page has inconsistent paging fields"
            );
        }
        Ok(page)
    }

    /// Read the total number of words (page 1, `total_items`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::fetch_page`].
    pub async fn fetch_count(&self, abort: Option<AbortRegistration>) -> Result<u64, ApiFailure> {
        let page = self.fetch_page(1, abort).await?;
        Ok(page.total_items)
    }

    /// Create one word.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure`] classified by [`parse_submit`].
    pub async fn submit(&self, request: &SubmissionRequest) -> Result<(), ApiFailure> {
        let url = self.config.create_url();
        let body = serde_json::to_value(request).map_err(|e| ApiFailure::BadResponse(e.to_string()))?;
        tracing::debug!(%url, severity = request.severity, "submitting word");

        let response = self
            .transport
            .post_json(&url, &body)
            .await
            .map_err(network_failure)?;

        parse_submit(&response).inspect_err(|e| log_failure("submit", e))
    }
}

impl std::fmt::Debug for AggregateClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AggregateClient").field("api_base", &self.config.api_base).finish_non_exhaustive()
    }
}

fn network_failure(e: TransportError) -> ApiFailure {
    tracing::warn!(error = %e, "request did not reach the server");
    ApiFailure::Network(e.to_string())
}

fn log_failure(op: &'static str, e: &ApiFailure) {
    tracing::warn!(op, reason = e.reason(), error = %e, "aggregate store call failed");
}

// =============================================================================
// PARSING
// =============================================================================

/// Decode a JSON body. `null` counts as no body.
fn decode_body(body: &str) -> Option<Value> {
    serde_json::from_str::<Value>(body).ok().filter(|v| !v.is_null())
}

/// Classify a collection read.
///
/// Success requires a JSON body with `success: true`. The HTTP status is
/// not consulted; the body decides.
pub(crate) fn parse_page(response: &RawResponse) -> Result<AggregatePage, ApiFailure> {
    let value = decode_body(&response.body)
        .ok_or_else(|| ApiFailure::BadResponse(format!("HTTP {}: body is not JSON", response.status)))?;

    if value.get("success").and_then(Value::as_bool) != Some(true) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        return Err(ApiFailure::Api { status: response.status, message });
    }

    serde_json::from_value(value).map_err(|e| ApiFailure::BadResponse(e.to_string()))
}

/// Classify a create call.
///
/// Success is a 2xx status with a JSON body that does not carry
/// `success: false`. A missing or non-boolean flag counts as success.
pub(crate) fn parse_submit(response: &RawResponse) -> Result<(), ApiFailure> {
    let Some(value) = decode_body(&response.body) else {
        return Err(ApiFailure::BadResponse(format!("HTTP {}: body is not JSON", response.status)));
    };

    let flagged_failure = value.get("success").and_then(Value::as_bool) == Some(false);
    if response.ok() && !flagged_failure {
        return Ok(());
    }

    Err(ApiFailure::Api { status: response.status, message: rejection_message(&value) })
}

/// Human explanation of a rejected create: `data.word` first, then `message`.
pub(crate) fn rejection_message(value: &Value) -> Option<String> {
    value
        .get("data")
        .and_then(|data| data.get("word"))
        .and_then(display_text)
        .or_else(|| value.get("message").and_then(display_text))
}

/// Render a field-error value as text. Lists (as Django REST returns them)
/// are joined; empty values yield `None`.
fn display_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(display_text).collect();
            if parts.is_empty() { None } else { Some(parts.join(", ")) }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
