//! Configuration types and parsing for stepmig.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file names searched for in a directory, in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["stepmig.yml", "stepmig.yaml"];

/// Optional project configuration from stepmig.yml
///
/// Every field can be overridden from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the `NNN_*.sql` migration files
    #[serde(default)]
    pub dir: Option<String>,

    /// Data source the migrations run against
    #[serde(default)]
    pub dsn: Option<String>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a directory if a config file is present.
    ///
    /// Returns the default configuration when neither stepmig.yml nor
    /// stepmig.yaml exists.
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
        {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Validate the configuration
    fn validate(&self) -> CoreResult<()> {
        if matches!(self.dir.as_deref(), Some(d) if d.trim().is_empty()) {
            return Err(CoreError::ConfigInvalid {
                message: "'dir' cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Merge command-line overrides on top of this configuration.
    pub fn resolve(&self, dir: Option<&Path>, dsn: Option<&str>) -> CoreResult<Settings> {
        let dir = dir
            .map(Path::to_path_buf)
            .or_else(|| self.dir.as_ref().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."));

        let dsn = dsn
            .or(self.dsn.as_deref())
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or_else(|| CoreError::ConfigInvalid {
                message: "please provide a dsn (--dsn, STEPMIG_DSN, or 'dsn' in stepmig.yml)"
                    .to_string(),
            })?;

        Ok(Settings {
            dir,
            dsn: dsn.to_string(),
        })
    }
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Migration directory
    pub dir: PathBuf,

    /// Data source locator
    pub dsn: String,
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
