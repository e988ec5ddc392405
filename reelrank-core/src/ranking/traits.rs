//! Core traits for ranking records
//!
//! A field marker names a value that can be read off a [`MovieRecord`] and
//! says which key type that value is compared as.

use reelrank_model::MovieRecord;
use std::cmp::Ordering;

/// Individual sort field with associated key type
///
/// Each field marker type implements this trait to specify
/// its comparison key type and how to read it from a record.
pub trait SortFieldMarker: Copy + Send + Sync + 'static {
    /// The type of key extracted for this field
    type Key: SortKey;

    /// Unique identifier for this field, used in logs
    const ID: &'static str;

    /// Extract the key for a record
    fn extract(&self, record: &MovieRecord) -> Self::Key;
}

/// Keys that can be compared for sorting
pub trait SortKey: Ord + Clone + Send + Sync {
    /// Compare two keys, highest first when `descending` is set
    #[inline]
    fn compare_with_order(&self, other: &Self, descending: bool) -> Ordering {
        if descending {
            other.cmp(self)
        } else {
            self.cmp(other)
        }
    }
}
