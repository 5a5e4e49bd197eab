//! User interface preferences.
//!
//! Preferences are small string key-value pairs (theme, zoom, sidebar
//! width). Handlers talk to a [`PreferenceStore`] so the backend can be
//! swapped; [`MemoryPreferences`] keeps values in memory and optionally
//! mirrors them to a JSON file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError, RwLock};

use serde::Serialize;
use tokio::sync::broadcast;

/// Key of the colour theme preference.
pub const THEME_KEY: &str = "theme";

/// Themes accepted for [`THEME_KEY`].
pub const THEMES: &[&str] = &["light", "dark"];

/// Theme used when none is stored.
pub const DEFAULT_THEME: &str = "light";

/// Longest accepted preference key.
const MAX_KEY_LEN: usize = 64;

/// Longest accepted preference value.
const MAX_VALUE_LEN: usize = 256;

/// Notification sent to subscribers when a preference changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PreferenceChange {
    /// Preference key.
    pub key: String,
    /// New value.
    pub value: String,
}

/// Error returned by preference operations.
#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    /// Key is empty, too long or contains unsupported characters.
    #[error("Invalid preference key: {0}")]
    InvalidKey(String),

    /// Value is not accepted for the key.
    #[error("Invalid value for preference {key}: {value}")]
    InvalidValue {
        /// Preference key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// Preferences file could not be read or written.
    #[error("Preferences file {}: {source}", path.display())]
    Io {
        /// Preferences file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Preferences file is not a JSON object of strings.
    #[error("Invalid preferences file {}: {source}", path.display())]
    Parse {
        /// Preferences file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
}

impl PreferenceError {
    /// Check whether the error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidKey(_) | Self::InvalidValue { .. })
    }
}

/// Key-value store for interface preferences.
pub trait PreferenceStore: Send + Sync {
    /// Get the value stored for `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` for `key` and notify subscribers.
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;

    /// Receive a [`PreferenceChange`] for every successful `set`.
    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange>;
}

/// In-memory preference store with optional JSON persistence.
///
/// With a backing file, [`PreferenceStore::set`] does blocking I/O; async
/// callers should run it on the blocking pool.
pub struct MemoryPreferences {
    values: RwLock<BTreeMap<String, String>>,
    /// Serialises writers so the file and the map change in the same order.
    writer: Mutex<()>,
    file: Option<PathBuf>,
    changes: broadcast::Sender<PreferenceChange>,
}

impl MemoryPreferences {
    /// Create an empty store that is not persisted.
    #[must_use]
    pub fn new() -> Self {
        Self::with_values(BTreeMap::new(), None)
    }

    /// Load the store from a JSON file, which is rewritten on every change.
    ///
    /// A missing file starts an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`PreferenceError`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(path: PathBuf) -> Result<Self, PreferenceError> {
        let values = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| PreferenceError::Parse {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(PreferenceError::Io { path, source }),
        };
        Ok(Self::with_values(values, Some(path)))
    }

    fn with_values(values: BTreeMap<String, String>, file: Option<PathBuf>) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            values: RwLock::new(values),
            writer: Mutex::new(()),
            file,
            changes,
        }
    }

    /// Backing file, if persisted.
    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

impl Default for MemoryPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        validate(key, value)?;

        {
            let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
            let mut next = self
                .values
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .clone();
            next.insert(key.to_owned(), value.to_owned());
            // Memory only changes once the file has
            if let Some(path) = &self.file {
                persist(path, &next)?;
            }
            *self.values.write().unwrap_or_else(PoisonError::into_inner) = next;
        }

        // No subscribers is not an error
        let _ = self.changes.send(PreferenceChange {
            key: key.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<PreferenceChange> {
        self.changes.subscribe()
    }
}

/// Current theme from a store, falling back to [`DEFAULT_THEME`].
pub fn current_theme(store: &dyn PreferenceStore) -> String {
    store
        .get(THEME_KEY)
        .unwrap_or_else(|| DEFAULT_THEME.to_owned())
}

fn validate(key: &str, value: &str) -> Result<(), PreferenceError> {
    let key_ok = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(b, b'-' | b'_' | b'.'));
    if !key_ok {
        return Err(PreferenceError::InvalidKey(key.to_owned()));
    }

    let value_ok = if key == THEME_KEY {
        THEMES.contains(&value)
    } else {
        value.len() <= MAX_VALUE_LEN
    };
    if !value_ok {
        return Err(PreferenceError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    Ok(())
}

fn persist(path: &Path, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
    let io_err = |source| PreferenceError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let content = serde_json::to_string_pretty(values).map_err(|source| PreferenceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(io_err)
}
