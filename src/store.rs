//! Persisted settings storage.
//!
//! The host shell owns the real settings backend; the engine only needs a
//! key/value surface, expressed here as the [`SettingsStore`] trait. Two
//! implementations are provided: [`MemoryStore`] for tests and
//! [`JsonFileStore`] for running against a flat JSON file.
//!
//! [`LayoutRegistry`] sits on top of a store and owns the layout list
//! lifecycle: parsing the persisted JSON, falling back to the built-in
//! defaults when the list is missing, malformed, or empty (and re-persisting
//! the defaults so the store heals itself), and tracking the per-monitor
//! selected layout.

use crate::tile::{default_layouts, Layout};
use log::warn;
use std::collections::HashMap;
use std::path::PathBuf;

/// Storage key for the serialized layout list.
const LAYOUTS_KEY: &str = "layouts-json";
/// Storage key for the monitor → selected-layout-id map.
const SELECTED_LAYOUTS_KEY: &str = "selected-layouts";

/// A key/value settings backend with string values.
pub trait SettingsStore {
    /// The error type produced by this backend.
    type Error: std::error::Error + Send + 'static;

    /// Read the value stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error>;
}

//  In-memory store

/// A [`SettingsStore`] backed by a plain map. Used in tests and by the drag
/// simulator.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, bypassing the trait (handy for test setup).
    pub fn seed(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

impl SettingsStore for MemoryStore {
    type Error = std::convert::Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

//  File store

/// Error from the file-backed settings store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not a JSON object: {0}")]
    Format(#[from] serde_json::Error),
}

/// A [`SettingsStore`] persisted as a single flat JSON object on disk.
///
/// Values are kept in memory and flushed on every write, mirroring how a
/// shell settings daemon applies changes immediately.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl JsonFileStore {
    /// Open (or create) the store at `path`. A missing file is an empty
    /// store; a malformed file is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, values })
    }

    fn flush(&self) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl SettingsStore for JsonFileStore {
    type Error = StoreError;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.values.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }
}

//  Layout registry

/// Owns the persisted layout list and per-monitor layout selection.
#[derive(Debug)]
pub struct LayoutRegistry<S: SettingsStore> {
    store: S,
}

impl<S: SettingsStore> LayoutRegistry<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The current layout list.
    ///
    /// Missing, malformed, or empty persisted JSON resets the store to the
    /// built-in default layouts; the engine never surfaces a parse failure,
    /// and at least one layout always exists.
    pub fn layouts(&mut self) -> Result<Vec<Layout>, S::Error> {
        let parsed = match self.store.read(LAYOUTS_KEY)? {
            Some(raw) => match serde_json::from_str::<Vec<Layout>>(&raw) {
                Ok(layouts) => Some(layouts),
                Err(e) => {
                    warn!("persisted layouts are malformed ({e}), resetting to defaults");
                    None
                }
            },
            None => None,
        };

        match parsed {
            Some(layouts) if !layouts.is_empty() => Ok(layouts),
            _ => {
                let defaults = default_layouts();
                self.persist(&defaults)?;
                Ok(defaults)
            }
        }
    }

    /// Replace the whole layout list and persist it.
    ///
    /// Deleting down to an empty list is disallowed: an empty `layouts`
    /// stores the built-in defaults instead.
    pub fn save_layouts(&mut self, layouts: Vec<Layout>) -> Result<Vec<Layout>, S::Error> {
        let layouts = if layouts.is_empty() {
            warn!("refusing to persist an empty layout list, storing defaults");
            default_layouts()
        } else {
            layouts
        };
        self.persist(&layouts)?;
        Ok(layouts)
    }

    /// The layout selected for `monitor`, falling back to the first layout
    /// when no selection exists or the selected id no longer does.
    pub fn selected_layout_for(&mut self, monitor: &str) -> Result<Layout, S::Error> {
        let layouts = self.layouts()?;
        let selected_id = self.selections()?.get(monitor).cloned();
        let layout = selected_id
            .and_then(|id| layouts.iter().find(|l| l.id == id).cloned())
            .unwrap_or_else(|| layouts[0].clone());
        Ok(layout)
    }

    /// Persist `layout_id` as the selection for `monitor`.
    pub fn select_layout(&mut self, monitor: &str, layout_id: &str) -> Result<(), S::Error> {
        let mut selections = self.selections()?;
        selections.insert(monitor.to_string(), layout_id.to_string());
        let raw = serde_json::to_string(&selections).unwrap_or_else(|_| "{}".to_string());
        self.store.write(SELECTED_LAYOUTS_KEY, &raw)
    }

    fn selections(&self) -> Result<HashMap<String, String>, S::Error> {
        let map = self
            .store
            .read(SELECTED_LAYOUTS_KEY)?
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Ok(map)
    }

    fn persist(&mut self, layouts: &[Layout]) -> Result<(), S::Error> {
        let raw = serde_json::to_string(layouts).unwrap_or_else(|_| "[]".to_string());
        self.store.write(LAYOUTS_KEY, &raw)
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
