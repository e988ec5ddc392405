use std::collections::BTreeMap;
use std::ops::Deref;

use crate::record::MovieRecord;

/// Ordered, size-capped selection of records. Rank 1 comes first.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct RankedList(Vec<MovieRecord>);

impl RankedList {
    pub fn new(records: Vec<MovieRecord>) -> Self {
        RankedList(records)
    }

    pub fn empty() -> Self {
        RankedList(Vec::new())
    }

    pub fn records(&self) -> &[MovieRecord] {
        &self.0
    }

    /// External ids in rank order.
    pub fn ids(&self) -> Vec<&str> {
        self.0.iter().map(|r| r.external_id().as_str()).collect()
    }

    /// Titles in rank order.
    pub fn titles(&self) -> Vec<&str> {
        self.0.iter().map(MovieRecord::title).collect()
    }

    pub fn into_inner(self) -> Vec<MovieRecord> {
        self.0
    }
}

impl Deref for RankedList {
    type Target = [MovieRecord];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<MovieRecord>> for RankedList {
    fn from(records: Vec<MovieRecord>) -> Self {
        RankedList(records)
    }
}

impl<'a> IntoIterator for &'a RankedList {
    type Item = &'a MovieRecord;
    type IntoIter = std::slice::Iter<'a, MovieRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Per-year rankings, iterated in ascending year order.
pub type YearRankings = BTreeMap<i32, RankedList>;

/// Every ranking computed from one ratings export.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Summary {
    /// Number of eligible movies, not capped by the list size
    pub total_count: usize,
    /// Only years that have at least one eligible movie appear
    pub top_per_year: YearRankings,
    pub top_all_time: RankedList,
    /// Ranked by `viewer - public`, highest first
    pub underrated_by_viewer: RankedList,
    /// Ranked by `public - viewer`, highest first
    pub overrated_by_viewer: RankedList,
}

impl Summary {
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.top_per_year.keys().copied()
    }
}
