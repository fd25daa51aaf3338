use crate::errors::PreferenceError;
use crate::models::{DisplayMode, Theme};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceKey {
    Theme,
    Mode,
}

impl PreferenceKey {
    pub fn name(self) -> &'static str {
        match self {
            PreferenceKey::Theme => "theme",
            PreferenceKey::Mode => "uiMode",
        }
    }

    pub fn default_value(self) -> &'static str {
        match self {
            PreferenceKey::Theme => Theme::default().as_str(),
            PreferenceKey::Mode => DisplayMode::default().as_str(),
        }
    }
}

/// String key-value persistence for the two user preferences.
#[async_trait]
pub trait PreferenceStore: Send {
    /// Stored value, or the key's default when nothing was stored.
    fn get(&self, key: PreferenceKey) -> String;
    async fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError>;
}

#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: BTreeMap<String, String>,
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> String {
        lookup(&self.values, key)
    }

    async fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.name().to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object on disk, rewritten in full on every `set`.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferenceStore {
    pub async fn load(path: PathBuf) -> Self {
        let values = load_values(&path).await;
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: PreferenceKey) -> String {
        lookup(&self.values, key)
    }

    async fn set(&mut self, key: PreferenceKey, value: &str) -> Result<(), PreferenceError> {
        self.values.insert(key.name().to_string(), value.to_string());
        let payload = serde_json::to_vec_pretty(&self.values)?;
        fs::write(&self.path, payload).await?;
        Ok(())
    }
}

fn lookup(values: &BTreeMap<String, String>, key: PreferenceKey) -> String {
    values
        .get(key.name())
        .cloned()
        .unwrap_or_else(|| key.default_value().to_string())
}

async fn load_values(path: &Path) -> BTreeMap<String, String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(values) => values,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                BTreeMap::new()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            BTreeMap::new()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct Preferences {
    pub theme: Theme,
    pub mode: DisplayMode,
}

impl Preferences {
    pub fn load(store: &dyn PreferenceStore) -> Self {
        let raw_theme = store.get(PreferenceKey::Theme);
        let theme = Theme::parse(&raw_theme).unwrap_or_else(|| {
            warn!("ignoring unknown theme preference {raw_theme:?}");
            Theme::default()
        });

        let raw_mode = store.get(PreferenceKey::Mode);
        let mode = DisplayMode::parse(&raw_mode).unwrap_or_else(|| {
            warn!("ignoring unknown display mode preference {raw_mode:?}");
            DisplayMode::default()
        });

        Self { theme, mode }
    }
}
