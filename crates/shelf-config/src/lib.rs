//! Configuration for shelf.
//!
//! Settings come from three layers, later ones winning:
//! 1. built-in defaults
//! 2. `shelf.toml`, either given explicitly or found in the current
//!    directory or one of its parents
//! 3. [`CliSettings`] from command-line flags
//!
//! Relative paths in the file resolve against the file's directory. String
//! values may reference the environment as `${VAR}` or `${VAR:-default}`.

mod error;
mod expand;
mod file;

use std::path::{Path, PathBuf};

pub use error::ConfigError;
use file::ConfigFile;

/// Name of the config file looked up during discovery.
pub const CONFIG_FILENAME: &str = "shelf.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 7979;
const DEFAULT_TITLE: &str = "Markdown Tutorials";
const DEFAULT_ROOT: &str = "tutorials";

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub server: ServerConfig,
    pub site: SiteConfig,
    pub tutorials: TutorialsConfig,
    pub preferences: PreferencesConfig,
    /// File the configuration was read from, if any.
    pub source: Option<PathBuf>,
}

/// Listen address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Title in the sidebar header and browser tab.
    pub title: String,
}

/// Where tutorials live and how the tree is cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TutorialsConfig {
    /// Root of the navigable tree.
    pub root: PathBuf,
    /// Memoise the tree scan and watch the root for changes.
    pub cache_enabled: bool,
}

/// Preferences persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesConfig {
    /// JSON file backing the store. `None` keeps preferences in memory.
    pub file: Option<PathBuf>,
}

/// Command-line overrides. `None` fields leave the loaded value alone.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub root: Option<PathBuf>,
    pub cache_enabled: Option<bool>,
}

impl CliSettings {
    fn apply_to(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.server.host.clone_from(host);
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(root) = &self.root {
            config.tutorials.root.clone_from(root);
        }
        if let Some(cache_enabled) = self.cache_enabled {
            config.tutorials.cache_enabled = cache_enabled;
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise `shelf.toml` is
    /// looked up from the current directory upwards, and built-in defaults
    /// rooted at the current directory are used when none is found.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file is missing, unreadable or invalid,
    /// or if the merged result fails [`Config::validate`].
    pub fn load(explicit: Option<&Path>, cli: Option<&CliSettings>) -> Result<Self, ConfigError> {
        let source = match explicit {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Some(path.to_path_buf()),
            None => std::env::current_dir().ok().and_then(|cwd| discover(&cwd)),
        };

        let mut config = match &source {
            Some(path) => {
                let base = path.parent().unwrap_or(Path::new("."));
                Self::from_file(ConfigFile::read(path)?, base)
            }
            None => Self::defaults(&std::env::current_dir().unwrap_or_default()),
        };
        config.source = source;

        if let Some(cli) = cli {
            cli.apply_to(&mut config);
        }
        config.validate()?;

        Ok(config)
    }

    /// Defaults with the tutorials root under `base`.
    pub fn defaults(base: &Path) -> Self {
        Self::from_file(ConfigFile::default(), base)
    }

    /// Check values that would make the server unusable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Invalid("server.host cannot be empty".to_owned()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port cannot be 0".to_owned()));
        }
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Invalid("site.title cannot be empty".to_owned()));
        }
        Ok(())
    }

    fn from_file(file: ConfigFile, base: &Path) -> Self {
        Self {
            server: ServerConfig {
                host: file.server.host.unwrap_or_else(|| DEFAULT_HOST.to_owned()),
                port: file.server.port.unwrap_or(DEFAULT_PORT),
            },
            site: SiteConfig {
                title: file.site.title.unwrap_or_else(|| DEFAULT_TITLE.to_owned()),
            },
            tutorials: TutorialsConfig {
                root: base.join(file.tutorials.root.as_deref().unwrap_or(DEFAULT_ROOT)),
                cache_enabled: file.tutorials.cache.unwrap_or(true),
            },
            preferences: PreferencesConfig {
                file: file.preferences.file.map(|f| base.join(f)),
            },
            source: None,
        }
    }
}

/// Find `shelf.toml` in `start` or the nearest ancestor that has one.
pub fn discover(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(CONFIG_FILENAME))
        .find(|candidate| candidate.is_file())
}
