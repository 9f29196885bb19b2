//! `docshelf.toml` configuration.
//!
//! Every field has a default, so an absent file and an empty file both yield
//! [`Config::default`].
//!
//! ```toml
//! [catalog]
//! root = "articles"
//! identifiers = ["API Gateway.htm"]
//!
//! [storage]
//! path = ".docshelf/state.json"
//!
//! [load]
//! max_concurrent_fetches = 16
//!
//! [session]
//! enforce = false
//! ttl_hours = 24
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::catalog::Catalog;
use crate::error::{DocshelfError, Result};

/// Default config file name, looked up in the catalog root.
pub const CONFIG_FILE_NAME: &str = "docshelf.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
    pub load: LoadConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding the documents. Relative paths resolve against the
    /// directory containing the config file.
    pub root: PathBuf,
    /// Catalog override. Empty means the built-in collection.
    pub identifiers: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            identifiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Key-value state file, relative to the catalog root.
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".docshelf").join("state.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    pub max_concurrent_fetches: usize,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            max_concurrent_fetches: 16,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Refuse listing commands without a live session record.
    pub enforce: bool,
    pub ttl_hours: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enforce: false,
            ttl_hours: 24,
        }
    }
}

impl Config {
    /// Parse a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::Config`] on malformed TOML, unknown keys, or
    /// a zero `max_concurrent_fetches`.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| DocshelfError::Config(e.to_string()))?;
        if config.load.max_concurrent_fetches == 0 {
            return Err(DocshelfError::Config(
                "load.max_concurrent_fetches must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Read a config file. Relative `catalog.root` is resolved against the
    /// file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::Io`] if the file cannot be read and
    /// [`DocshelfError::Config`] if it does not parse.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&text)?;
        if config.catalog.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.catalog.root = base.join(&config.catalog.root);
        }
        Ok(config)
    }

    /// Load `<dir>/docshelf.toml` if it exists; otherwise defaults rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] when the file exists.
    pub fn discover(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            return Self::load(&path);
        }
        let mut config = Self::default();
        config.catalog.root = dir.to_path_buf();
        Ok(config)
    }

    /// The configured catalog, or the built-in one when no override is set.
    ///
    /// # Errors
    ///
    /// Returns [`DocshelfError::Catalog`] if the override list is invalid.
    pub fn catalog(&self) -> Result<Catalog> {
        if self.catalog.identifiers.is_empty() {
            return Ok(Catalog::builtin());
        }
        Ok(Catalog::new(self.catalog.identifiers.iter().cloned())?)
    }

    /// Absolute-or-root-relative location of the state file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        if self.storage.path.is_absolute() {
            self.storage.path.clone()
        } else {
            self.catalog.root.join(&self.storage.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_yields_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.load.max_concurrent_fetches, 16);
        assert_eq!(config.session.ttl_hours, 24);
        assert!(!config.session.enforce);
    }

    #[test]
    fn parses_all_sections() {
        let text = r#"
[catalog]
root = "articles"
identifiers = ["API Gateway.htm", "A Crash Course in Docker.htm"]

[storage]
path = "state.json"

[load]
max_concurrent_fetches = 4

[session]
enforce = true
ttl_hours = 2
"#;
        let config = Config::from_toml_str(text).unwrap();
        assert_eq!(config.catalog.root, PathBuf::from("articles"));
        assert_eq!(config.catalog().unwrap().len(), 2);
        assert_eq!(config.load.max_concurrent_fetches, 4);
        assert!(config.session.enforce);
        assert_eq!(config.storage_path(), PathBuf::from("articles").join("state.json"));
    }

    #[test]
    fn rejects_unknown_keys_and_zero_concurrency() {
        assert!(Config::from_toml_str("[catalog]\nrooot = \"x\"").is_err());
        let err = Config::from_toml_str("[load]\nmax_concurrent_fetches = 0").unwrap_err();
        assert!(err.to_string().contains("max_concurrent_fetches"));
    }

    #[test]
    fn duplicate_override_is_a_catalog_error() {
        let config =
            Config::from_toml_str("[catalog]\nidentifiers = [\"a.htm\", \"a.htm\"]").unwrap();
        assert!(matches!(config.catalog(), Err(DocshelfError::Catalog(_))));
    }

    #[test]
    fn empty_override_uses_builtin_catalog() {
        let config = Config::default();
        assert_eq!(config.catalog().unwrap(), Catalog::builtin());
    }

    #[test]
    fn load_resolves_root_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "[catalog]\nroot = \"docs\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.catalog.root, dir.path().join("docs"));
    }

    #[test]
    fn discover_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::discover(dir.path()).unwrap();
        assert_eq!(config.catalog.root, dir.path());
        assert_eq!(
            config.storage_path(),
            dir.path().join(".docshelf").join("state.json")
        );
    }
}
