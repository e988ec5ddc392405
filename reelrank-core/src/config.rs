//! Typed settings for ingestion and ranking.
//!
//! Every field carries a serde default so a partial (or empty) TOML document
//! deserializes into a usable [`Config`]. Loading from files and the
//! environment lives in the CLI crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RankingError;

/// Length of every ranked list unless configured otherwise.
pub const DEFAULT_LIST_SIZE: usize = 10;

/// Eligible-record count at which the ranked aggregates are computed on the
/// rayon pool instead of sequentially.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// How records with equal ranking keys are ordered.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Keep the order in which records were ingested.
    #[default]
    InputOrder,
    /// Case-insensitive title, ascending; ingestion order after that.
    Title,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::InputOrder => "input-order",
            TieBreak::Title => "title",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "input-order" | "input" => Ok(TieBreak::InputOrder),
            "title" => Ok(TieBreak::Title),
            other => Err(format!(
                "unknown tie-break '{other}' (expected 'input-order' or 'title')"
            )),
        }
    }
}

/// Ranking engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Maximum number of entries per ranked list.
    pub list_size: usize,
    pub tie_break: TieBreak,
    /// Compute the aggregates concurrently once the eligible set reaches
    /// this size.
    pub parallel_threshold: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            list_size: DEFAULT_LIST_SIZE,
            tie_break: TieBreak::default(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl RankingConfig {
    pub fn with_list_size(mut self, list_size: usize) -> Self {
        self.list_size = list_size;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    pub fn validate(&self) -> Result<(), RankingError> {
        if self.list_size == 0 {
            return Err(RankingError::InvalidConfig(
                "list_size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// What ingestion does with a row it cannot decode.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedRows {
    /// Abort on the first malformed row.
    #[default]
    Fail,
    /// Log and drop the row, then keep going.
    Skip,
}

/// Export decoding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestOptions {
    /// Whether the first row is a header to discard.
    pub has_headers: bool,
    pub malformed_rows: MalformedRows,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            has_headers: true,
            malformed_rows: MalformedRows::Fail,
        }
    }
}

impl IngestOptions {
    pub fn skipping_malformed() -> Self {
        Self {
            malformed_rows: MalformedRows::Skip,
            ..Self::default()
        }
    }
}

/// Top-level settings document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ranking: RankingConfig,
    pub ingest: IngestOptions,
}

impl Config {
    pub fn validate(&self) -> Result<(), RankingError> {
        self.ranking.validate()
    }
}
