//! # badwords-client
//!
//! Client interaction controller for the public bad-words submission page.
//! Visitors see the aggregate word count, submit new words with a severity
//! rating, and must accept a content disclaimer before their first write.
//!
//! This crate contains the preference store, the REST client for the
//! aggregate store, the page state (consent, theme, status, submission),
//! and the [`controller::PageController`] that wires them together. Markup
//! and styling live elsewhere; the host renders [`controller::ViewState`].
//!
//! Native builds use `reqwest` + `tokio`. Browser builds enable the
//! `hydrate` feature and use `gloo-net`, `gloo-timers` and `web-sys`.

pub mod config;
pub mod controller;
pub mod logging;
pub mod net;
pub mod runtime;
pub mod state;
pub mod storage;
pub mod util;

#[cfg(test)]
pub(crate) mod test_helpers;
