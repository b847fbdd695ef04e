//! Configuration for pirtuk.
//!
//! Values are layered with [`figment`], later sources overriding earlier ones:
//!
//! 1. Built-in defaults ([`Config::default`]).
//! 2. `config.toml` in the platform config directory, if it exists
//!    (`~/.config/pirtuk/config.toml` on Linux).
//! 3. An explicit file passed to [`Config::load`] (TOML, YAML or JSON,
//!    chosen by extension).
//! 4. `PIRTUK_*` environment variables. Nested keys are separated by a
//!    double underscore, e.g. `PIRTUK_PROGRESS__WIDTH=60`.
//!
//! | Key              | Default                         |
//! |------------------|---------------------------------|
//! | `database`       | `<data dir>/books.db`           |
//! | `log`            | `warn`                          |
//! | `progress.width` | `80`                            |
//! | `progress.fill`  | `x`                             |

pub mod error;
mod paths;

use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

const ENV_PREFIX: &str = "PIRTUK_";
const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "books.db";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location of the SQLite store. Derived from the platform data directory
    /// when unset.
    pub database: Option<PathBuf>,
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    pub log: String,
    pub progress: ProgressConfig,
}
impl Default for Config {
    fn default() -> Self {
        Self { database: None, log: "warn".to_string(), progress: ProgressConfig::default() }
    }
}

/// Appearance of the per-book progress bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressConfig {
    /// Number of cells in the bar.
    pub width: usize,
    /// Character used for read pages.
    pub fill: char,
}
impl Default for ProgressConfig {
    fn default() -> Self {
        Self { width: 80, fill: 'x' }
    }
}

impl Config {
    /// Load the configuration from every source, with an optional explicit file.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(dir) = paths::config_dir() {
            figment = figment.merge(Toml::file(dir.join(CONFIG_FILE)));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Self::file_provider(path)?);
        }
        Self::extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn file_provider(path: &Path) -> Result<Figment> {
        if !path.is_file() {
            exn::bail!(ErrorKind::NotFound(path.to_path_buf()));
        }
        let extension = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
        Ok(match extension.as_deref() {
            Some("toml") => Figment::from(Toml::file(path)),
            Some("yaml" | "yml") => Figment::from(Yaml::file(path)),
            Some("json") => Figment::from(Json::file(path)),
            _ => exn::bail!(ErrorKind::UnsupportedFormat(path.to_path_buf())),
        })
    }

    fn extract(figment: Figment) -> Result<Self> {
        let config: Self = figment.extract().or_raise(|| ErrorKind::Load)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.progress.width == 0 {
            exn::bail!(ErrorKind::InvalidValue("progress.width must be positive"));
        }
        if self.database.as_ref().is_some_and(|p| p.as_os_str().is_empty()) {
            exn::bail!(ErrorKind::InvalidValue("database must not be empty"));
        }
        Ok(())
    }

    /// Replace the configured database location (e.g. from a command-line flag).
    pub fn with_database(mut self, path: impl Into<PathBuf>) -> Self {
        self.database = Some(path.into());
        self
    }

    /// Resolved location of the SQLite store.
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => Ok(paths::data_dir().ok_or_raise(|| ErrorKind::NoHomeDirectory)?.join(DATABASE_FILE)),
        }
    }

    /// Create the directory holding the store, returning the store's path.
    pub fn ensure_database_dir(&self) -> Result<PathBuf> {
        let path = self.database_path()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).or_raise(|| ErrorKind::CreateDirectory(parent.to_path_buf()))?;
        }
        Ok(path)
    }
}
