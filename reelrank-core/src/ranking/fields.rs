//! Field marker types for ranking
//!
//! These zero-sized types represent the values records can be ranked by.
//! Each field marker implements the SortFieldMarker trait to specify its key type.

use super::keys::{FloatKey, IntKey, StringKey};
use super::traits::SortFieldMarker;
use reelrank_model::MovieRecord;

/// Rank by the viewer's own rating
#[derive(Copy, Clone, Debug)]
pub struct ViewerRatingField;

impl SortFieldMarker for ViewerRatingField {
    type Key = IntKey;
    const ID: &'static str = "viewer_rating";

    fn extract(&self, record: &MovieRecord) -> Self::Key {
        IntKey::new(i64::from(record.viewer_rating()))
    }
}

/// Rank by how much the viewer out-rated the public (`viewer - public`)
#[derive(Copy, Clone, Debug)]
pub struct UnderratedField;

impl SortFieldMarker for UnderratedField {
    type Key = FloatKey;
    const ID: &'static str = "underrated_delta";

    fn extract(&self, record: &MovieRecord) -> Self::Key {
        FloatKey::new(record.underrated_delta())
    }
}

/// Rank by how much the public out-rated the viewer (`public - viewer`)
#[derive(Copy, Clone, Debug)]
pub struct OverratedField;

impl SortFieldMarker for OverratedField {
    type Key = FloatKey;
    const ID: &'static str = "overrated_delta";

    fn extract(&self, record: &MovieRecord) -> Self::Key {
        FloatKey::new(record.overrated_delta())
    }
}

/// Sort by title (alphabetical)
#[derive(Copy, Clone, Debug)]
pub struct TitleField;

impl SortFieldMarker for TitleField {
    type Key = StringKey;
    const ID: &'static str = "title";

    fn extract(&self, record: &MovieRecord) -> Self::Key {
        StringKey::new(record.title())
    }
}
