//! High score persisted as JSON in the user config directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use block_blaster_core::HighScoreStore;

const APP_DIR: &str = "block-blaster";
const FILENAME: &str = "high_score.json";

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreFile {
    high_score: u32,
}

#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `path`, or at the default location when `None`.
    pub fn open(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        Ok(Self::new(path))
    }

    /// `<config dir>/block-blaster/high_score.json`
    pub fn default_path() -> Result<PathBuf> {
        let base = dirs::config_dir().context("no config directory for this user")?;
        Ok(base.join(APP_DIR).join(FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Removes the stored file. Returns whether there was one.
    pub fn clear(&self) -> Result<bool> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => {
                Err(err).with_context(|| format!("failed to remove {}", self.path.display()))
            }
        }
    }
}

impl HighScoreStore for JsonFileStore {
    type Error = anyhow::Error;

    fn load(&mut self) -> Result<Option<u32>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", self.path.display()));
            }
        };
        let file: HighScoreFile = serde_json::from_str(&content)
            .with_context(|| format!("malformed high score file {}", self.path.display()))?;
        Ok(Some(file.high_score))
    }

    fn save(&mut self, high_score: u32) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(&HighScoreFile { high_score })?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }
}
