//! Task spawning and sleeping for the single UI thread.
//!
//! Natively these run on the ambient `tokio` runtime, so callers must be
//! inside one. In the browser they use `wasm-bindgen-futures` and
//! `gloo-timers`, which need no runtime.

use std::future::Future;
use std::time::Duration;

use futures::future::{AbortHandle, Abortable};

/// Spawn a detached task that can be stopped through the returned handle.
///
/// Aborting drops the task at its next suspension point without running
/// any code that follows it.
#[cfg(not(feature = "hydrate"))]
pub fn spawn_abortable<F>(fut: F) -> AbortHandle
where
    F: Future<Output = ()> + Send + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    tokio::spawn(async move {
        let _ = Abortable::new(fut, registration).await;
    });
    handle
}

/// Spawn a detached task that can be stopped through the returned handle.
#[cfg(feature = "hydrate")]
pub fn spawn_abortable<F>(fut: F) -> AbortHandle
where
    F: Future<Output = ()> + 'static,
{
    let (handle, registration) = AbortHandle::new_pair();
    wasm_bindgen_futures::spawn_local(async move {
        let _ = Abortable::new(fut, registration).await;
    });
    handle
}

/// Suspend the current task for `duration`.
pub async fn sleep(duration: Duration) {
    #[cfg(feature = "hydrate")]
    {
        gloo_timers::future::sleep(duration).await;
    }
    #[cfg(not(feature = "hydrate"))]
    {
        tokio::time::sleep(duration).await;
    }
}
