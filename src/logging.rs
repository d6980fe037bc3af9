//! Logging bootstrap for the host page.
//!
//! The library only emits `tracing` events. Natively this installs a
//! `tracing-subscriber` fmt subscriber; in the browser it installs the
//! panic hook so panics reach the console. Safe to call more than once.

/// Install the platform logging backend.
pub fn init() {
    #[cfg(feature = "hydrate")]
    {
        console_error_panic_hook::set_once();
    }
    #[cfg(all(not(feature = "hydrate"), not(target_arch = "wasm32")))]
    {
        // A second call finds a global subscriber already set; that is fine.
        let _ = tracing_subscriber::fmt().try_init();
    }
}
