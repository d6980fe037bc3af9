//! Wire types and failure taxonomy for the aggregate store API.

use serde::{Deserialize, Deserializer, Serialize};

use crate::util::severity;

// =============================================================================
// ERRORS
// =============================================================================

/// Classified outcome of a failed API operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiFailure {
    /// The request never reached the server or the connection dropped.
    #[error("network request failed: {0}")]
    Network(String),

    /// The body was not JSON, or JSON without the expected shape.
    #[error("unexpected response: {0}")]
    BadResponse(String),

    /// The server answered with an explicit failure.
    #[error("API rejected request (status {status})")]
    Api { status: u16, message: Option<String> },

    /// The caller cancelled the request. Never shown to the user.
    #[error("request aborted")]
    Aborted,
}

impl ApiFailure {
    /// Stable reason code for logs and tests.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::BadResponse(_) => "bad-response",
            Self::Api { .. } => "api-error",
            Self::Aborted => "aborted",
        }
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("word is empty")]
    EmptyWord,

    #[error("severity {0} is outside {min}..={max}", min = severity::MIN, max = severity::MAX)]
    SeverityOutOfRange(i64),

    #[error("disclaimer not accepted")]
    ConsentRequired,
}

impl ValidationError {
    #[must_use]
    pub fn reason(&self) -> &'static str {
        "validation"
    }
}

// =============================================================================
// AGGREGATE PAGE
// =============================================================================

/// Entries are passed through untouched; only the count is consumed.
pub type Item = serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
}

/// One page of the word collection as returned by `GET /api/v1/badword/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatePage {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub links: PageLinks,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_items: u64,
    #[serde(default)]
    pub total_pages: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    #[serde(default = "default_current_page")]
    pub current_page: u64,
    #[serde(default)]
    pub data: Vec<Item>,
}

/// Numbers and numeric strings are taken as-is (fractions truncate);
/// anything else, including negatives and `null`, counts as zero.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match &value {
        serde_json::Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(truncate_count)),
        serde_json::Value::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| s.parse::<f64>().ok().map(truncate_count))
        }
        serde_json::Value::Bool(b) => Some(u64::from(*b)),
        _ => None,
    };
    Ok(number.unwrap_or(0))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn truncate_count(n: f64) -> u64 {
    if n.is_finite() && n > 0.0 { n.trunc() as u64 } else { 0 }
}

fn default_page_size() -> u64 {
    1
}

fn default_current_page() -> u64 {
    1
}

impl AggregatePage {
    /// Whether the paging fields agree with each other.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let page_in_range = self.total_items == 0 || self.current_page <= self.total_pages;
        self.page_size > 0 && self.current_page >= 1 && page_in_range && self.data.len() as u64 <= self.page_size
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// Body of `POST /api/v1/badword/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionRequest {
    pub word: String,
    pub severity: u8,
}

impl SubmissionRequest {
    /// Trim `word` and check `severity` against the accepted range.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyWord`] for blank input and
    /// [`ValidationError::SeverityOutOfRange`] outside `1..=100`.
    pub fn new(word: &str, severity: i64) -> Result<Self, ValidationError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(ValidationError::EmptyWord);
        }
        let severity = severity::checked(severity).ok_or(ValidationError::SeverityOutOfRange(severity))?;
        Ok(Self { word: word.to_string(), severity })
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
