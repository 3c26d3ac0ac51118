use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "CATALOG_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Clone, Debug, PartialEq)]
pub struct CatalogConfig {
    pub actor: ActorConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActorConfig {
    pub buffer_size: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            actor: ActorConfig { buffer_size: 32 },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

// File layer: every key optional, applied over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    actor: Option<ActorPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ActorPatch {
    buffer_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl CatalogConfig {
    /// Defaults, then the config file (if any), then `CATALOG_*` environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        Self::load_with(path.as_deref(), |key| env::var(key).ok())
    }

    /// Same as [`CatalogConfig::load`] with an explicit file and environment lookup.
    ///
    /// An explicit path must exist; without one, `catalog.toml` is read only if present.
    pub fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let file = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };
        if let Some(path) = file {
            let raw = fs::read_to_string(&path)
                .map_err(|source| ConfigError::ReadFile { path: path.clone(), source })?;
            config.apply_patch(toml::from_str(&raw)?);
        }

        config.apply_env_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(test)]
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.apply_patch(toml::from_str(raw)?);
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(actor) = patch.actor {
            if let Some(buffer_size) = actor.buffer_size {
                self.actor.buffer_size = buffer_size;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(level) = lookup("CATALOG_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("CATALOG_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        if let Some(value) = lookup("CATALOG_ACTOR_BUFFER_SIZE") {
            self.actor.buffer_size = value.trim().parse().map_err(|_| {
                ConfigError::InvalidEnvOverride { key: "CATALOG_ACTOR_BUFFER_SIZE".to_string(), value }
            })?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.actor.buffer_size == 0 {
            return Err(ConfigError::Validation("actor.buffer_size must be greater than zero".to_string()));
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation("logging.level must not be empty".to_string()));
        }
        Ok(())
    }
}
