//! Top-level error type.

use std::io;

use thiserror::Error;

use crate::data::ConfigError;

pub type Result<T> = std::result::Result<T, TablesError>;

#[derive(Debug, Error)]
pub enum TablesError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),
}
