//! Strategy pattern for composable sorting
//!
//! Strategies reorder a view of borrowed records in place. Every strategy is
//! a stable sort, so chaining them from the least to the most significant
//! field yields a deterministic multi-key order.

use super::fields::TitleField;
use super::traits::{SortFieldMarker, SortKey};
use crate::config::TieBreak;
use reelrank_model::MovieRecord;

/// A sorting strategy that can be composed
pub trait SortStrategy: Send + Sync {
    /// Apply this sorting strategy to the given view
    fn sort<'a>(&self, items: &mut [&'a MovieRecord]);

    /// Field identifier for diagnostics
    fn describe(&self) -> String;
}

/// Single field sort strategy
#[derive(Debug, Clone, Copy)]
pub struct FieldSort<F: SortFieldMarker> {
    field: F,
    descending: bool,
}

impl<F: SortFieldMarker> FieldSort<F> {
    pub fn ascending(field: F) -> Self {
        Self {
            field,
            descending: false,
        }
    }

    pub fn descending(field: F) -> Self {
        Self {
            field,
            descending: true,
        }
    }
}

impl<F: SortFieldMarker> SortStrategy for FieldSort<F> {
    fn sort<'a>(&self, items: &mut [&'a MovieRecord]) {
        // Extract keys once, not per comparison
        let mut keyed: Vec<(F::Key, &'a MovieRecord)> = items
            .iter()
            .map(|record| (self.field.extract(record), *record))
            .collect();

        keyed.sort_by(|a, b| a.0.compare_with_order(&b.0, self.descending));

        for (slot, (_, record)) in items.iter_mut().zip(keyed) {
            *slot = record;
        }
    }

    fn describe(&self) -> String {
        let order = if self.descending { "desc" } else { "asc" };
        format!("{} {order}", F::ID)
    }
}

/// Multi-field sort built from stable passes
pub struct ChainedSort {
    strategies: Vec<Box<dyn SortStrategy>>,
}

impl ChainedSort {
    /// Primary descending field plus the configured tie-break.
    pub fn ranking<F: SortFieldMarker>(field: F, tie_break: TieBreak) -> Self {
        let chain = ChainedSort {
            strategies: vec![Box::new(FieldSort::descending(field))],
        };
        match tie_break {
            TieBreak::InputOrder => chain,
            TieBreak::Title => chain.then_by(FieldSort::ascending(TitleField)),
        }
    }

    /// Add a lower-priority strategy to the chain
    fn then_by(mut self, strategy: impl SortStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }
}

impl std::fmt::Debug for ChainedSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.strategies.iter().map(|s| s.describe()))
            .finish()
    }
}

impl SortStrategy for ChainedSort {
    fn sort<'a>(&self, items: &mut [&'a MovieRecord]) {
        // Apply strategies in reverse order for stable sorting
        // This ensures primary sort takes precedence
        for strategy in self.strategies.iter().rev() {
            strategy.sort(items);
        }
    }

    fn describe(&self) -> String {
        self.strategies
            .iter()
            .map(|s| s.describe())
            .collect::<Vec<_>>()
            .join(", then ")
    }
}
