use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HighScoreFile {
    #[serde(default)]
    high_score: u32,
}

/// Best score, mirrored to a small JSON file. Disk problems never reach
/// the caller.
#[derive(Debug, Clone)]
pub struct HighScore {
    path: PathBuf,
    value: u32,
}

impl HighScore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let value = match read(&path) {
            Ok(value) => value,
            Err(err) => {
                if path.exists() {
                    warn!("could not read high score from {}: {}", path.display(), err);
                }
                0
            }
        };
        Self { path, value }
    }

    pub fn get(&self) -> u32 {
        self.value
    }

    pub fn set(&mut self, value: u32) {
        self.value = value;
    }

    pub fn save(&self) {
        if let Err(err) = write(&self.path, self.value) {
            warn!("could not save high score to {}: {}", self.path.display(), err);
        }
    }

    /// Records `score` if it beats the current best. Returns whether it did.
    pub fn update(&mut self, score: u32) -> bool {
        if score <= self.value {
            return false;
        }
        info!("new high score {}", score);
        self.value = score;
        self.save();
        true
    }
}

fn read(path: &Path) -> Result<u32> {
    let text = fs::read_to_string(path)?;
    let file: HighScoreFile = serde_json::from_str(&text)?;
    Ok(file.high_score)
}

fn write(path: &Path, value: u32) -> Result<()> {
    let text = serde_json::to_string(&HighScoreFile { high_score: value })?;
    fs::write(path, text)?;
    Ok(())
}
