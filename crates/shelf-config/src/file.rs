//! On-disk `shelf.toml` layout.
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 7979
//!
//! [site]
//! title = "Markdown Tutorials"
//!
//! [tutorials]
//! root = "tutorials"   # relative to this file
//! cache = true
//!
//! [preferences]
//! file = ".shelf/preferences.json"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;
use crate::expand::expand_in_place;

/// Parsed config file, before paths are resolved.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ConfigFile {
    pub(crate) server: ServerSection,
    pub(crate) site: SiteSection,
    pub(crate) tutorials: TutorialsSection,
    pub(crate) preferences: PreferencesSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServerSection {
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SiteSection {
    pub(crate) title: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct TutorialsSection {
    pub(crate) root: Option<String>,
    pub(crate) cache: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct PreferencesSection {
    pub(crate) file: Option<String>,
}

impl ConfigFile {
    /// Read and parse a config file, expanding environment references.
    pub(crate) fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut file: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        file.expand_env()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> Result<(), ConfigError> {
        expand_in_place(&mut self.server.host, "server.host")?;
        expand_in_place(&mut self.site.title, "site.title")?;
        expand_in_place(&mut self.tutorials.root, "tutorials.root")?;
        expand_in_place(&mut self.preferences.file, "preferences.file")
    }
}

