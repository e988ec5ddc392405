//! Sort key types for comparing records
//!
//! These types wrap the values extracted from records and give them a total
//! order, including the floating point deltas.

use super::traits::SortKey;
use ordered_float::OrderedFloat;

/// Integer key for whole-number ratings
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntKey(i64);

impl IntKey {
    pub fn new(value: i64) -> Self {
        IntKey(value)
    }
}

impl SortKey for IntKey {}

/// Float key for ratings and rating differences
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FloatKey(OrderedFloat<f64>);

impl FloatKey {
    pub fn new(value: f64) -> Self {
        FloatKey(OrderedFloat(value))
    }
}

impl SortKey for FloatKey {}

/// String key for text-based sorting, compared case-insensitively with the
/// original spelling as a final tiebreaker
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StringKey {
    folded: String,
    original: String,
}

impl StringKey {
    pub fn new(value: &str) -> Self {
        StringKey {
            folded: value.to_lowercase(),
            original: value.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }
}

impl SortKey for StringKey {}
