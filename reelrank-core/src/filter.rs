//! Narrows ingested records to the ones the ranking engine accepts.

use reelrank_model::{MovieRecord, RATING_SCALE};
use tracing::{debug, warn};

/// Selects feature films from an ingested record set.
///
/// Only the title classification is checked. Viewer ratings outside the
/// usual 1-10 scale are let through and logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct RecordFilter;

impl RecordFilter {
    pub fn new() -> Self {
        RecordFilter
    }

    /// Whether a single record is eligible for ranking.
    pub fn accepts(&self, record: &MovieRecord) -> bool {
        record.is_movie()
    }

    /// Returns the eligible records in their original order.
    pub fn apply<I>(&self, records: I) -> Vec<MovieRecord>
    where
        I: IntoIterator<Item = MovieRecord>,
    {
        let mut excluded = 0usize;
        let eligible: Vec<MovieRecord> = records
            .into_iter()
            .filter(|record| {
                let keep = self.accepts(record);
                if !keep {
                    excluded += 1;
                } else if !record.has_rating_in_scale() {
                    warn!(
                        external_id = %record.external_id(),
                        rating = record.viewer_rating(),
                        "viewer rating outside {}..={}",
                        RATING_SCALE.start(),
                        RATING_SCALE.end()
                    );
                }
                keep
            })
            .collect();

        debug!(eligible = eligible.len(), excluded, "filtered records");
        eligible
    }
}

/// Keep only records whose title type is `movie`, preserving order.
pub fn filter_eligible<I>(records: I) -> Vec<MovieRecord>
where
    I: IntoIterator<Item = MovieRecord>,
{
    RecordFilter::new().apply(records)
}
