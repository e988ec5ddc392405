use std::collections::BTreeMap;

use reelrank_model::{MovieRecord, RankedList, Summary, YearRankings};
use tracing::{debug, info, instrument};

use super::fields::{OverratedField, UnderratedField, ViewerRatingField};
use super::strategy::{ChainedSort, SortStrategy};
use super::traits::SortFieldMarker;
use crate::config::RankingConfig;
use crate::error::RankingError;

/// Computes every ranking of a [`Summary`] from a set of eligible records.
///
/// Each aggregate is an independent pure function of the same borrowed
/// input; nothing is mutated and the results are assembled once at the end.
#[derive(Debug, Clone, Default)]
pub struct RankingEngine {
    config: RankingConfig,
}

impl RankingEngine {
    pub fn new(config: RankingConfig) -> Result<Self, RankingError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Rank `records`, which must all be movies.
    ///
    /// Fails without computing anything if a non-movie record is present;
    /// run the input through [`RecordFilter`](crate::filter::RecordFilter)
    /// first. Empty input is fine and produces an empty summary.
    #[instrument(skip_all, fields(records = records.len()))]
    pub fn summarize(
        &self,
        records: &[MovieRecord],
    ) -> Result<Summary, RankingError> {
        ensure_eligible(records)?;

        let view: Vec<&MovieRecord> = records.iter().collect();

        let (top_per_year, (top_all_time, (underrated, overrated))) =
            if view.len() >= self.config.parallel_threshold {
                debug!(
                    threshold = self.config.parallel_threshold,
                    "ranking aggregates in parallel"
                );
                rayon::join(
                    || self.top_per_year(&view),
                    || {
                        rayon::join(
                            || self.top_all_time(&view),
                            || {
                                rayon::join(
                                    || self.underrated_by_viewer(&view),
                                    || self.overrated_by_viewer(&view),
                                )
                            },
                        )
                    },
                )
            } else {
                (
                    self.top_per_year(&view),
                    (
                        self.top_all_time(&view),
                        (
                            self.underrated_by_viewer(&view),
                            self.overrated_by_viewer(&view),
                        ),
                    ),
                )
            };

        let summary = Summary {
            total_count: records.len(),
            top_per_year,
            top_all_time,
            underrated_by_viewer: underrated,
            overrated_by_viewer: overrated,
        };

        info!(
            total = summary.total_count,
            years = summary.top_per_year.len(),
            list_size = self.config.list_size,
            tie_break = %self.config.tie_break,
            "summarized ratings"
        );
        Ok(summary)
    }

    pub(crate) fn top_per_year(&self, records: &[&MovieRecord]) -> YearRankings {
        let mut by_year: BTreeMap<i32, Vec<&MovieRecord>> = BTreeMap::new();
        for &record in records {
            by_year.entry(record.year()).or_default().push(record);
        }

        by_year
            .into_iter()
            .map(|(year, group)| (year, self.rank(ViewerRatingField, &group)))
            .collect()
    }

    pub(crate) fn top_all_time(&self, records: &[&MovieRecord]) -> RankedList {
        self.rank(ViewerRatingField, records)
    }

    pub(crate) fn underrated_by_viewer(
        &self,
        records: &[&MovieRecord],
    ) -> RankedList {
        self.rank(UnderratedField, records)
    }

    pub(crate) fn overrated_by_viewer(
        &self,
        records: &[&MovieRecord],
    ) -> RankedList {
        self.rank(OverratedField, records)
    }

    fn rank<F: SortFieldMarker>(
        &self,
        field: F,
        records: &[&MovieRecord],
    ) -> RankedList {
        let mut view = records.to_vec();
        ChainedSort::ranking(field, self.config.tie_break).sort(&mut view);

        view.into_iter()
            .take(self.config.list_size)
            .cloned()
            .collect::<Vec<_>>()
            .into()
    }
}

/// Rank `records` with the default configuration (lists of ten, ties kept in
/// input order).
pub fn summarize(records: &[MovieRecord]) -> Result<Summary, RankingError> {
    RankingEngine::default().summarize(records)
}

fn ensure_eligible(records: &[MovieRecord]) -> Result<(), RankingError> {
    match records.iter().find(|record| !record.is_movie()) {
        Some(record) => Err(RankingError::IneligibleRecord {
            external_id: record.external_id().to_string(),
            title_type: record.title_type().clone(),
        }),
        None => Ok(()),
    }
}
