//! Network layer for the remote aggregate store.
//!
//! DESIGN
//! ======
//! `transport` moves bytes (reqwest natively, gloo-net in the browser).
//! `api` issues the two operations and classifies every outcome into
//! [`types::ApiFailure`], so nothing above it sees HTTP details.

pub mod api;
pub mod transport;
pub mod types;
