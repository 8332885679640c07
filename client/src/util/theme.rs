//! Theme controller: dark/light preference, persisted per browser.
//!
//! Reads the stored preference from `localStorage`, mirrors it onto the
//! `<html>` element as the `dark` class, and writes every change back.
//!
//! DESIGN
//! ======
//! All browser effects go through [`ThemeHost`], so the decision logic in
//! [`initial_theme`] and [`toggle`] runs unchanged under native tests with a
//! fake host. [`BrowserHost`] is the only implementation that touches the DOM.
//!
//! TRADE-OFFS
//! ==========
//! Preference persistence is best-effort browser-only behavior; SSR paths
//! no-op so server rendering stays deterministic. The shell renders with the
//! `dark` class, so the stored preference is applied right after hydration.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// `localStorage` key holding `"dark"` or `"light"`.
pub const STORAGE_KEY: &str = "polylaunch-theme";

/// Class on the document element that switches the palette.
pub const DARK_CLASS: &str = "dark";

/// Colour scheme. Dark unless the visitor chose otherwise.
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

    #[must_use]
    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    fn from_dark(dark: bool) -> Self {
        if dark { Self::Dark } else { Self::Light }
    }
}

/// Side effects the theme controller needs from its environment.
pub trait ThemeHost {
    /// Stored preference, if any.
    fn stored(&self) -> Option<String>;
    /// Write the preference.
    fn persist(&self, value: &str);
    /// Whether the document carries the dark marker; `None` without a document.
    fn document_is_dark(&self) -> Option<bool>;
    /// Add or remove the dark marker.
    fn mark_document(&self, dark: bool);
}

/// [`ThemeHost`] over `window.localStorage` and `<html class>`.
///
/// Without a browser every read comes back empty and every write is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserHost;

#[cfg(feature = "hydrate")]
impl BrowserHost {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn root() -> Option<web_sys::Element> {
        web_sys::window()?.document()?.document_element()
    }
}

impl ThemeHost for BrowserHost {
    fn stored(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            Self::storage()?.get_item(STORAGE_KEY).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn persist(&self, value: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = Self::storage() {
                let _ = storage.set_item(STORAGE_KEY, value);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = value;
        }
    }

    fn document_is_dark(&self) -> Option<bool> {
        #[cfg(feature = "hydrate")]
        {
            Self::root().map(|el| el.class_list().contains(DARK_CLASS))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn mark_document(&self, dark: bool) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(el) = Self::root() {
                let _ = el.class_list().toggle_with_force(DARK_CLASS, dark);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = dark;
        }
    }
}

/// Work out the theme to start with.
///
/// A non-empty stored value wins (`"dark"` is dark, anything else is light).
/// Without one, the document marker decides. Without a browser at all the
/// answer is [`Theme::Dark`].
pub fn initial_theme(host: &impl ThemeHost) -> Theme {
    if let Some(stored) = host.stored().filter(|v| !v.is_empty()) {
        return Theme::from_dark(stored == Theme::Dark.as_str());
    }
    host.document_is_dark().map_or(Theme::default(), Theme::from_dark)
}

/// Mark the document and persist `theme`.
pub fn apply(host: &impl ThemeHost, theme: Theme) {
    host.mark_document(theme.is_dark());
    host.persist(theme.as_str());
}

/// Flip `current`, apply the result, and return it.
pub fn toggle(host: &impl ThemeHost, current: Theme) -> Theme {
    let next = current.toggled();
    apply(host, next);
    next
}
