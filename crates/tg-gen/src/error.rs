use std::io;

use thiserror::Error;

use tg_core::CoreError;
use tg_region::RegionError;

/// A configuration value that cannot be used.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("missing required option `{0}`")]
    MissingOption(&'static str),

    #[error("invalid option `{option}`: {reason}")]
    Invalid {
        option: &'static str,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum GenError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("region error: {0}")]
    Region(#[from] RegionError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type GenResult<T> = Result<T, GenError>;
