use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::models::Difficulty;

use super::GameConfig;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {difficulty} tier: {reason}")]
    InvalidTier {
        difficulty: Difficulty,
        reason: &'static str,
    },
}

/// Load and validate a JSON configuration file.
///
/// Fields left out of the file keep their default values.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();

    let json_content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: GameConfig =
        serde_json::from_str(&json_content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    config.validate()?;

    debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}
