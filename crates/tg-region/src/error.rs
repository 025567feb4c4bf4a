use thiserror::Error;

use tg_core::CoreError;

#[derive(Debug, Error)]
pub enum RegionError {
    #[error("missing option {0:?}")]
    MissingOption(&'static str),

    #[error("region parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RegionResult<T> = Result<T, RegionError>;
