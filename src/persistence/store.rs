use std::{
    collections::{
        BTreeMap,
        HashMap,
    },
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use serde::de::DeserializeOwned;

use crate::core::DeckError;

/// String key/value persistence, the same shape as browser local storage.
pub trait KeyValueStore {
    fn read(&self, key: &str) -> Result<Option<String>, DeckError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), DeckError>;
}

/// Outcome of a read that never fails outright.
#[derive(Debug)]
pub enum StoreRead<T> {
    Stored(T),
    Defaulted(T),
    Degraded { value: T, error: DeckError },
}

impl<T> StoreRead<T> {
    pub fn value(&self) -> &T {
        match self {
            StoreRead::Stored(value) | StoreRead::Defaulted(value) => value,
            StoreRead::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StoreRead::Stored(value) | StoreRead::Defaulted(value) => value,
            StoreRead::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StoreRead::Degraded { .. })
    }
}

pub fn read_string<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> StoreRead<String> {
    match store.read(key) {
        Ok(Some(value)) if !value.is_empty() => StoreRead::Stored(value),
        Ok(_) => StoreRead::Defaulted(String::new()),
        Err(error) => {
            log::warn!("Failed to read {}: {}. Using defaults.", key, error);
            StoreRead::Degraded { value: String::new(), error }
        }
    }
}

pub fn read_json<T, S>(store: &S, key: &str) -> StoreRead<T>
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return StoreRead::Defaulted(T::default()),
        Err(error) => {
            log::warn!("Failed to read {}: {}. Using defaults.", key, error);
            return StoreRead::Degraded { value: T::default(), error };
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => StoreRead::Stored(value),
        Err(e) => {
            log::warn!("Corrupt value under {}: {}. Using defaults.", key, e);
            StoreRead::Degraded { value: T::default(), error: e.into() }
        }
    }
}

/// Writes and logs instead of surfacing failures.
pub fn write_best_effort<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.write(key, value) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to persist {}: {}", key, e);
            false
        }
    }
}

/// All keys in a single pretty-printed JSON object on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self { file_path: file_path.into() }
    }

    pub fn open_default() -> Self {
        Self::new(super::get_data_file_path("preferences.json"))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn load_entries(&self) -> Result<BTreeMap<String, String>, DeckError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        Ok(serde_json::from_str(&content)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<String>, DeckError> {
        Ok(self.load_entries()?.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), DeckError> {
        // A corrupt file is replaced rather than blocking every later write.
        let mut entries = self.load_entries().unwrap_or_default();
        entries.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                DeckError::Storage(format!("Failed to create preferences directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(&self.file_path, content).map_err(|e| {
            DeckError::Storage(format!("Failed to write {}: {}", self.file_path.display(), e))
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, DeckError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), DeckError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
