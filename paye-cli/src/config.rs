//! Layered settings: built-in defaults, then an optional TOML file, then
//! command-line flags.
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! connection_string = "paye.db"
//!
//! [chart]
//! radius = 70.0
//!
//! [logging]
//! level = "info"
//! file = "taxclarity.log"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use paye_core::calculations::breakdown::DEFAULT_RING_RADIUS;
use paye_core::calculations::{BreakdownGeometry, GeometryError};
use paye_core::store::StoreConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::logging::DEFAULT_LOG_LEVEL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid chart settings: {0}")]
    Chart(#[from] GeometryError),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub radius: f64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            radius: DEFAULT_RING_RADIUS,
        }
    }
}

impl ChartConfig {
    pub fn geometry(&self) -> Result<BreakdownGeometry, ConfigError> {
        Ok(BreakdownGeometry::new(self.radius)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

/// Settings read from the config file. Missing sections and keys keep their
/// defaults.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub chart: ChartConfig,
    pub logging: LoggingConfig,
}

/// Values given on the command line; each one that is set wins over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub backend: Option<String>,
    pub connection_string: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&text)
    }

    /// Defaults when `path` is `None`, otherwise the parsed file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn apply(
        mut self,
        overrides: ConfigOverrides,
    ) -> Self {
        if let Some(backend) = overrides.backend {
            self.store.backend = backend;
        }
        if let Some(connection_string) = overrides.connection_string {
            self.store.connection_string = connection_string;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.log_file.is_some() {
            self.logging.file = overrides.log_file;
        }
        self
    }
}
