use std::path::PathBuf;

use reelrank_model::{ModelError, TitleType};
use thiserror::Error;

/// Failures while decoding a ratings export.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("failed to open export {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: expected {expected} columns, found {found}")]
    ColumnCount {
        line: u64,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: missing value for '{column}'")]
    MissingField { line: u64, column: &'static str },

    #[error("line {line}: invalid value {value:?} for '{column}'")]
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: {source}")]
    Model {
        line: u64,
        #[source]
        source: ModelError,
    },
}

/// Failures raised by the ranking engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RankingError {
    /// A record that is not a feature film reached the engine; the record
    /// filter was skipped by the caller.
    #[error("record {external_id} is a '{title_type}', only movies can be ranked")]
    IneligibleRecord {
        external_id: String,
        title_type: TitleType,
    },

    #[error("invalid ranking configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

pub type Result<T> = std::result::Result<T, CoreError>;
