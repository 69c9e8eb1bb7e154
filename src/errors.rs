use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures raised by the pipeline stages. All of them propagate unmodified
/// to the single handler in `main`; nothing is recovered mid-pipeline.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot read {path}: {source}")]
    FileAccess { path: PathBuf, source: io::Error },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("required column {column:?} not found in input header")]
    Schema { column: &'static str },

    #[error("no transactions with at least 2 items; nothing to encode")]
    EmptyTransactions,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}
