//! Core library for reelrank.
//!
//! Turns a personal ratings export into a [`Summary`]:
//!
//! 1. [`ingest`] decodes the 13-column CSV export into [`MovieRecord`]s,
//! 2. [`filter`] keeps only the records eligible for ranking (feature films),
//! 3. [`ranking`] computes the per-year, all-time, underrated and overrated
//!    rankings.
//!
//! Filtering and ranking are pure functions of their input; only ingestion
//! touches I/O.

pub mod config;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod ranking;

use std::io::Read;
use std::path::Path;

pub use config::{Config, IngestOptions, MalformedRows, RankingConfig, TieBreak};
pub use error::{CoreError, IngestError, RankingError, Result};
pub use filter::{RecordFilter, filter_eligible};
pub use ingest::{IngestReport, read_export, read_export_path};
pub use ranking::{RankingEngine, summarize};

pub use reelrank_model::{
    ExternalId, ModelError, MovieRecord, RankedList, Summary, TitleType,
    YearRankings,
};

/// Ingest, filter and rank an export held by `reader`.
///
/// Returns the ingestion report alongside the summary so callers can tell
/// how many rows were read and skipped. The configuration is validated
/// before any input is read.
pub fn summarize_export<R: Read>(
    reader: R,
    config: &Config,
) -> Result<(IngestReport, Summary)> {
    let engine = RankingEngine::new(config.ranking.clone())?;
    let report = read_export(reader, &config.ingest)?;
    rank_report(&engine, report)
}

/// [`summarize_export`] for a file on disk.
pub fn summarize_export_path(
    path: impl AsRef<Path>,
    config: &Config,
) -> Result<(IngestReport, Summary)> {
    let engine = RankingEngine::new(config.ranking.clone())?;
    let report = read_export_path(path, &config.ingest)?;
    rank_report(&engine, report)
}

fn rank_report(
    engine: &RankingEngine,
    report: IngestReport,
) -> Result<(IngestReport, Summary)> {
    let eligible = RecordFilter::new().apply(report.records.iter().cloned());
    let summary = engine.summarize(&eligible)?;
    Ok((report, summary))
}
