use crate::error::ModelError;
use crate::ids::ExternalId;
use crate::title_type::TitleType;

use std::ops::RangeInclusive;

/// The scale viewers are expected to rate on. Not enforced by the model.
pub const RATING_SCALE: RangeInclusive<i32> = 1..=10;

/// One rated title from a personal ratings export.
///
/// Fields are private so that a record cannot change once built; rankings
/// only ever reorder references to records or clone them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovieRecord {
    external_id: ExternalId,
    title: String,
    year: i32,
    viewer_rating: i32,
    public_rating: f64,
    title_type: TitleType,
}

impl MovieRecord {
    pub fn new(
        external_id: ExternalId,
        title: impl Into<String>,
        year: i32,
        viewer_rating: i32,
        public_rating: f64,
        title_type: TitleType,
    ) -> Result<Self, ModelError> {
        if !public_rating.is_finite() {
            return Err(ModelError::InvalidRecord(format!(
                "public rating for {external_id} is not a finite number"
            )));
        }
        Ok(Self {
            external_id,
            title: title.into(),
            year,
            viewer_rating,
            public_rating,
            title_type,
        })
    }

    /// Shorthand for a `movie` record; mostly useful in tests and fixtures.
    pub fn movie(
        external_id: &str,
        title: &str,
        year: i32,
        viewer_rating: i32,
        public_rating: f64,
    ) -> Result<Self, ModelError> {
        Self::new(
            ExternalId::new(external_id)?,
            title,
            year,
            viewer_rating,
            public_rating,
            TitleType::Movie,
        )
    }

    pub fn external_id(&self) -> &ExternalId {
        &self.external_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn viewer_rating(&self) -> i32 {
        self.viewer_rating
    }

    pub fn public_rating(&self) -> f64 {
        self.public_rating
    }

    pub fn title_type(&self) -> &TitleType {
        &self.title_type
    }

    pub fn is_movie(&self) -> bool {
        self.title_type.is_movie()
    }

    /// How much more the viewer liked the title than the public did.
    ///
    /// Computed in tenths of a point, the precision public ratings are
    /// published at, so equal differences compare equal.
    pub fn underrated_delta(&self) -> f64 {
        (self.viewer_tenths() - self.public_tenths()) / 10.0
    }

    /// How much more the public liked the title than the viewer did.
    pub fn overrated_delta(&self) -> f64 {
        (self.public_tenths() - self.viewer_tenths()) / 10.0
    }

    fn viewer_tenths(&self) -> f64 {
        f64::from(self.viewer_rating) * 10.0
    }

    fn public_tenths(&self) -> f64 {
        (self.public_rating * 10.0).round()
    }

    pub fn has_rating_in_scale(&self) -> bool {
        RATING_SCALE.contains(&self.viewer_rating)
    }
}
