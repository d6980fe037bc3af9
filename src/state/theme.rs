//! Theme controller.
//!
//! Reads the stored theme (`"dark"` / `"light"`, default dark), mirrors every
//! change back to the preference store and applies it to a [`ThemeSurface`].

use std::sync::{Arc, Mutex};

use super::lock;
use crate::storage::{PreferenceStore, THEME_KEY};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Parse a stored value. Anything unrecognized is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// Where the active theme becomes visible (the document root in a browser).
pub trait ThemeSurface: Send + Sync {
    fn apply(&self, theme: Theme);
}

#[derive(Clone)]
pub struct ThemeController {
    store: PreferenceStore,
    surface: Arc<dyn ThemeSurface>,
    current: Arc<Mutex<Theme>>,
}

impl ThemeController {
    /// Read the stored theme; an empty or unreadable store means dark.
    pub fn new(store: PreferenceStore, surface: Arc<dyn ThemeSurface>) -> Self {
        let initial = store.get(THEME_KEY).as_deref().and_then(Theme::parse).unwrap_or_default();
        Self { store, surface, current: Arc::new(Mutex::new(initial)) }
    }

    /// Re-apply the marker and mirror the value to storage. Run on every mount.
    pub fn mount(&self) {
        self.commit(self.current());
    }

    /// Flip the theme and return the new value.
    pub fn toggle(&self) -> Theme {
        let next = {
            let mut current = lock(&self.current);
            *current = current.toggled();
            *current
        };
        self.commit(next);
        tracing::debug!(theme = next.as_str(), "theme toggled");
        next
    }

    #[must_use]
    pub fn current(&self) -> Theme {
        *lock(&self.current)
    }

    fn commit(&self, theme: Theme) {
        self.surface.apply(theme);
        self.store.set(THEME_KEY, theme.as_str());
    }
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController").field("current", &self.current()).finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "theme_test.rs"]
mod tests;
