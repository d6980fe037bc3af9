//! Client-side page state.
//!
//! DESIGN
//! ======
//! State is split by concern so each piece can be driven and tested on its
//! own. Every handle is cheap to clone and shares its state through
//! `Arc<Mutex<_>>`; locks are never held across an `.await`.

pub mod consent;
pub mod count;
pub mod status;
pub mod submission;
pub mod theme;

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
