use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Result, TyxtError};
use crate::theme::ThemeId;
use crate::word_generator::DEFAULT_WORD_COUNT;

/// User preferences read at startup. Command line flags take precedence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub word_count: usize,
    pub theme: ThemeId,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_count: DEFAULT_WORD_COUNT,
            theme: ThemeId::RosePine,
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "tyxt") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("tyxt_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `Ok(None)` when there is no config file
    pub fn try_load(&self) -> Result<Option<Config>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.config_error(e.to_string())),
        };
        serde_json::from_slice::<Config>(&bytes)
            .map(Some)
            .map_err(|e| self.config_error(e.to_string()))
    }

    fn config_error(&self, reason: String) -> TyxtError {
        TyxtError::Config {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match self.try_load() {
            Ok(Some(cfg)) => {
                tracing::debug!(path = %self.path.display(), "config loaded");
                cfg
            }
            Ok(None) => Config::default(),
            Err(err) => {
                tracing::warn!(%err, "ignoring config file");
                Config::default()
            }
        }
    }
}
