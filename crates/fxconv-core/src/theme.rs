//! Light/dark theme preference.
//!
//! The preference lives under [`DARK_MODE_KEY`] as `"true"` or `"false"`. When
//! nothing is stored the system color scheme decides.

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::CoreError;

pub const DARK_MODE_KEY: &str = "darkMode";

/// Key/value storage for user preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), CoreError>;
}

/// Preferences kept as a flat JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFilePreferenceStore {
    path: PathBuf,
}

impl JsonFilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CoreError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(error) => Err(error.into()),
        }
    }
}

impl PreferenceStore for JsonFilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());

        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

/// Process-local preferences.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), CoreError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl Display for ThemeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current theme, passed explicitly to whatever renders it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThemeState {
    is_dark: bool,
}

impl ThemeState {
    pub const fn new(is_dark: bool) -> Self {
        Self { is_dark }
    }

    /// Stored preference if present and valid, otherwise the system scheme.
    pub fn resolve(store: &dyn PreferenceStore, system_prefers_dark: bool) -> Result<Self, CoreError> {
        let is_dark = match store.get(DARK_MODE_KEY)?.as_deref() {
            Some("true") => true,
            Some("false") => false,
            Some(other) => {
                tracing::debug!(value = other, "ignoring unrecognized theme preference");
                system_prefers_dark
            }
            None => system_prefers_dark,
        };
        Ok(Self { is_dark })
    }

    /// Flip the theme and persist the new value.
    pub fn toggle(&mut self, store: &dyn PreferenceStore) -> Result<ThemeMode, CoreError> {
        let is_dark = !self.is_dark;
        store.set(DARK_MODE_KEY, if is_dark { "true" } else { "false" })?;
        self.is_dark = is_dark;
        Ok(self.mode())
    }

    pub const fn is_dark(&self) -> bool {
        self.is_dark
    }

    pub const fn mode(&self) -> ThemeMode {
        if self.is_dark {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        }
    }

    /// Label of the toggle control: the action it performs.
    pub const fn label(&self) -> &'static str {
        if self.is_dark {
            "Switch to light mode"
        } else {
            "Switch to dark mode"
        }
    }
}

/// Interpret a `COLORFGBG` value (`"15;0"`, `"0;default;15"`): dark when the
/// background slot is a dark ANSI color.
pub fn prefers_dark_from_colorfgbg(value: Option<&str>) -> bool {
    value
        .and_then(|value| value.rsplit(';').next())
        .and_then(|background| background.trim().parse::<u8>().ok())
        .is_some_and(|background| matches!(background, 0..=6 | 8))
}
