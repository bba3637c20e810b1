//! Accessibility preferences kept in a namespaced key/value store.
//!
//! Keys look like `accessibility-high-contrast`; values are the strings
//! `"true"` and `"false"`. Store failures are logged and never fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::PrefsError;

const KEY_PREFIX: &str = "accessibility-";

pub trait PreferenceStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten in full on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PrefsError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = fs::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PrefsError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PrefsError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        fs::write(&self.path, serde_json::to_string_pretty(&entries)?)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessibilityPref {
    HighContrast,
    LargeText,
    ReduceMotion,
    ScreenReader,
}

impl AccessibilityPref {
    pub const ALL: [AccessibilityPref; 4] = [
        AccessibilityPref::HighContrast,
        AccessibilityPref::LargeText,
        AccessibilityPref::ReduceMotion,
        AccessibilityPref::ScreenReader,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            AccessibilityPref::HighContrast => "high-contrast",
            AccessibilityPref::LargeText => "large-text",
            AccessibilityPref::ReduceMotion => "reduce-motion",
            AccessibilityPref::ScreenReader => "screen-reader",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pref| pref.name() == name)
    }

    pub fn storage_key(&self) -> String {
        format!("{}{}", KEY_PREFIX, self.name())
    }

    /// Screen-reader mode is on unless explicitly stored as "false".
    fn decode(&self, stored: Option<&str>) -> bool {
        match self {
            AccessibilityPref::ScreenReader => stored != Some("false"),
            _ => stored == Some("true"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityPrefs {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduce_motion: bool,
    pub screen_reader: bool,
}

impl Default for AccessibilityPrefs {
    fn default() -> Self {
        Self {
            high_contrast: false,
            large_text: false,
            reduce_motion: false,
            screen_reader: true,
        }
    }
}

impl AccessibilityPrefs {
    pub fn get(&self, pref: AccessibilityPref) -> bool {
        match pref {
            AccessibilityPref::HighContrast => self.high_contrast,
            AccessibilityPref::LargeText => self.large_text,
            AccessibilityPref::ReduceMotion => self.reduce_motion,
            AccessibilityPref::ScreenReader => self.screen_reader,
        }
    }

    pub fn set(&mut self, pref: AccessibilityPref, enabled: bool) {
        match pref {
            AccessibilityPref::HighContrast => self.high_contrast = enabled,
            AccessibilityPref::LargeText => self.large_text = enabled,
            AccessibilityPref::ReduceMotion => self.reduce_motion = enabled,
            AccessibilityPref::ScreenReader => self.screen_reader = enabled,
        }
    }

    /// Unreadable stores yield the defaults.
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let mut prefs = Self::default();
        for pref in AccessibilityPref::ALL {
            match store.get(&pref.storage_key()) {
                Ok(stored) => prefs.set(pref, pref.decode(stored.as_deref())),
                Err(e) => {
                    error!("Could not load accessibility preferences: {}", e);
                    return Self::default();
                }
            }
        }
        prefs
    }
}

/// Persist one flag. Failures are logged; the in-memory value still applies.
pub fn save_preference(store: &mut dyn PreferenceStore, pref: AccessibilityPref, enabled: bool) {
    let value = if enabled { "true" } else { "false" };
    if let Err(e) = store.set(&pref.storage_key(), value) {
        warn!("Could not save accessibility preference {}: {}", pref.name(), e);
    }
}
