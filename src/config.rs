use crate::error::{Error, Result};
use crate::phrase::DEFAULT_WORD_COUNT;
use crate::session::DEFAULT_DURATION_SECS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub number_of_words: usize,
    pub number_of_secs: u64,
    pub words_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            number_of_words: DEFAULT_WORD_COUNT,
            number_of_secs: DEFAULT_DURATION_SECS,
            words_file: None,
        }
    }
}

impl From<&crate::app::Settings> for Config {
    fn from(s: &crate::app::Settings) -> Self {
        Self {
            number_of_words: s.number_of_words,
            number_of_secs: s.duration_secs,
            words_file: s.words_file.clone(),
        }
    }
}

pub trait ConfigStore {
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new() -> Self {
        let path = crate::app_dirs::AppDirs::config_path()
            .unwrap_or_else(|| PathBuf::from("typespeed_config.json"));
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
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<Config>(&bytes) {
                Ok(cfg) => return cfg,
                Err(err) => {
                    tracing::warn!(path = %self.path.display(), %err, "ignoring malformed config")
                }
            },
            Err(err) => {
                tracing::debug!(path = %self.path.display(), %err, "no config file, using defaults")
            }
        }
        Config::default()
    }

    fn save(&self, cfg: &Config) -> Result<()> {
        let write = || -> std::io::Result<()> {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent)?;
            }
            let data = serde_json::to_vec_pretty(cfg)?;
            fs::write(&self.path, data)
        };
        write().map_err(|source| Error::Config {
            path: self.path.clone(),
            source,
        })
    }
}
