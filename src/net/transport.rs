//! HTTP transport seam.
//!
//! Client-side (hydrate): `gloo-net` on top of `fetch`.
//! Native: `reqwest` with rustls.
//!
//! A transport only moves bytes. It reports the status code and raw body
//! and leaves every judgement about success to [`super::api`].

use crate::config::Timeouts;

/// Status and undecoded body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    /// `true` for 2xx statuses.
    #[must_use]
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(String),

    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),
}

#[cfg_attr(not(feature = "hydrate"), async_trait::async_trait)]
#[cfg_attr(feature = "hydrate", async_trait::async_trait(?Send))]
pub trait Transport: Send + Sync {
    /// Issue a `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError>;

    /// Issue a `POST` with a JSON body and `Content-Type: application/json`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if no response was received.
    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, TransportError>;
}

// =============================================================================
// NATIVE
// =============================================================================

#[cfg(not(feature = "hydrate"))]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

#[cfg(not(feature = "hydrate"))]
impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`TransportError::ClientBuild`] if the client cannot be built.
    pub fn new(timeouts: Timeouts) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(timeouts.request_secs))
            .connect_timeout(std::time::Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| TransportError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    async fn finish(response: reqwest::Response) -> Result<RawResponse, TransportError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(not(feature = "hydrate"))]
#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::finish(response).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, TransportError> {
        let response = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::finish(response).await
    }
}

// =============================================================================
// BROWSER
// =============================================================================

/// `fetch`-backed transport. Timeouts are left to the browser.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl GlooTransport {
    #[must_use]
    pub fn new(timeouts: Timeouts) -> Self {
        let _ = timeouts;
        Self
    }

    async fn finish(response: gloo_net::http::Response) -> Result<RawResponse, TransportError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(feature = "hydrate")]
#[async_trait::async_trait(?Send)]
impl Transport for GlooTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, TransportError> {
        let response = gloo_net::http::Request::get(url)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::finish(response).await
    }

    async fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<RawResponse, TransportError> {
        let response = gloo_net::http::Request::post(url)
            .json(body)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;
        Self::finish(response).await
    }
}
