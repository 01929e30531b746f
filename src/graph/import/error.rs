use thiserror::Error;

use crate::error::AcoError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read problem file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid format on line {line}: {msg}")]
    InvalidFormat { line: usize, msg: String },
    #[error("unsupported problem format {0:?}")]
    UnsupportedFormat(String),
    #[error(transparent)]
    Graph(#[from] AcoError),
}
