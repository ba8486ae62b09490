//! Light/dark theme preference
//!
//! The persisted preference wins over the system color scheme. System changes
//! are only followed while nothing is persisted.

use std::collections::HashMap;

use thiserror::Error;

/// Local storage key holding `"true"` / `"false"`
pub const STORAGE_KEY: &str = "darkMode";

/// Class applied to the document root while dark
pub const DARK_CLASS: &str = "dark";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("preference storage unavailable")]
    Unavailable,

    #[error("failed to write preference {key}: {reason}")]
    Write { key: &'static str, reason: String },
}

/// Key/value persistence. Backed by `localStorage` in the browser.
pub trait PreferenceStore {
    fn load(&self, key: &'static str) -> Result<Option<String>, StorageError>;
    fn store(&mut self, key: &'static str, value: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<&'static str, String>,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store whose writes always fail, like a browser with storage disabled.
    pub fn read_only() -> Self {
        Self {
            values: HashMap::new(),
            fail_writes: true,
        }
    }

    pub fn with(key: &'static str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key, value.to_string());
        store
    }

    pub fn get(&self, key: &'static str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl PreferenceStore for MemoryStore {
    fn load(&self, key: &'static str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn store(&mut self, key: &'static str, value: &str) -> Result<(), StorageError> {
        if self.fail_writes {
            return Err(StorageError::Write {
                key,
                reason: "quota exceeded".into(),
            });
        }
        self.values.insert(key, value.to_string());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn from_dark(dark: bool) -> Self {
        if dark { Theme::Dark } else { Theme::Light }
    }

    pub fn flipped(self) -> Self {
        Theme::from_dark(!self.is_dark())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parse `"light"` / `"dark"`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// Root element class list entry, if any
    pub fn root_class(self) -> Option<&'static str> {
        self.is_dark().then_some(DARK_CLASS)
    }

    fn stored_value(self) -> &'static str {
        if self.is_dark() { "true" } else { "false" }
    }
}

pub struct ThemeController<S: PreferenceStore> {
    store: S,
    theme: Theme,
}

impl<S: PreferenceStore> ThemeController<S> {
    /// Resolve the starting theme from storage, falling back to the system.
    pub fn init(store: S, system_prefers_dark: bool) -> Self {
        let theme = match store.load(STORAGE_KEY) {
            Ok(Some(saved)) => Theme::from_dark(saved == "true"),
            Ok(None) => Theme::from_dark(system_prefers_dark),
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference");
                Theme::from_dark(system_prefers_dark)
            }
        };
        tracing::debug!(theme = theme.as_str(), "theme initialized");
        Self { store, theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_explicit_preference(&self) -> bool {
        matches!(self.store.load(STORAGE_KEY), Ok(Some(_)))
    }

    /// Flip and persist. Returns the new theme.
    pub fn toggle(&mut self) -> Theme {
        self.set_theme(self.theme.flipped())
    }

    /// Set explicitly and persist. A failed write is logged; the in-memory
    /// theme changes regardless.
    pub fn set_theme(&mut self, theme: Theme) -> Theme {
        self.theme = theme;
        if let Err(err) = self.store.store(STORAGE_KEY, theme.stored_value()) {
            tracing::warn!(error = %err, "theme preference not persisted");
        }
        theme
    }

    /// System color scheme changed. Returns the applied theme when followed.
    pub fn on_system_change(&mut self, prefers_dark: bool) -> Option<Theme> {
        if self.has_explicit_preference() {
            return None;
        }
        self.theme = Theme::from_dark(prefers_dark);
        Some(self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_preference_beats_system() {
        let controller = ThemeController::init(MemoryStore::with(STORAGE_KEY, "false"), true);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn falls_back_to_system_preference() {
        let controller = ThemeController::init(MemoryStore::new(), true);
        assert!(controller.is_dark());
        assert_eq!(controller.theme().root_class(), Some("dark"));
    }

    #[test]
    fn double_toggle_restores_class_and_stored_value() {
        let mut controller = ThemeController::init(MemoryStore::new(), false);
        assert_eq!(controller.toggle(), Theme::Dark);
        assert_eq!(controller.store().get(STORAGE_KEY), Some("true"));

        assert_eq!(controller.toggle(), Theme::Light);
        assert_eq!(controller.theme().root_class(), None);
        assert_eq!(controller.store().get(STORAGE_KEY), Some("false"));
    }

    #[test]
    fn system_change_ignored_once_preference_is_persisted() {
        let mut controller = ThemeController::init(MemoryStore::new(), false);
        assert_eq!(controller.on_system_change(true), Some(Theme::Dark));

        controller.set_theme(Theme::Light);
        assert_eq!(controller.on_system_change(true), None);
        assert_eq!(controller.theme(), Theme::Light);
    }

    #[test]
    fn failed_persist_still_changes_theme() {
        let mut controller = ThemeController::init(MemoryStore::read_only(), false);
        controller.toggle();
        assert!(controller.is_dark());
        assert!(!controller.has_explicit_preference());
    }

    #[test]
    fn parse_accepts_only_known_names() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("Dark"), None);
    }
}
