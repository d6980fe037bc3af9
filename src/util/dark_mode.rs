//! Theme marker on the document root.
//!
//! Adds or removes the `dark` class on the `<html>` element. Outside a
//! browser (no `hydrate` feature) there is no document and applying is a
//! no-op apart from a debug event.

use crate::state::theme::{Theme, ThemeSurface};

/// Class toggled on `<html>` while the dark theme is active.
pub const DARK_CLASS: &str = "dark";

/// The page's `<html>` element.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentRoot;

impl ThemeSurface for DocumentRoot {
    fn apply(&self, theme: Theme) {
        apply(theme);
    }
}

/// Apply or remove the `dark` class on the `<html>` element.
pub fn apply(theme: Theme) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            if let Some(el) = doc.document_element() {
                let class_list = el.class_list();
                let _ = class_list.toggle_with_force(DARK_CLASS, theme == Theme::Dark);
            }
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        tracing::debug!(theme = theme.as_str(), "no document; theme marker skipped");
    }
}
