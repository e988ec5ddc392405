//! Positional layout of one export row.

use reelrank_model::{ExternalId, MovieRecord, TitleType};
use serde::Deserialize;
use serde::de::IgnoredAny;

use crate::error::IngestError;

/// Number of columns every export row carries.
pub const EXPORT_COLUMNS: usize = 13;

/// Column labels in export order, used in error messages.
pub const COLUMN_NAMES: [&str; EXPORT_COLUMNS] = [
    "Const",
    "Your Rating",
    "Date Rated",
    "Title",
    "URL",
    "Title Type",
    "IMDb Rating",
    "Runtime (mins)",
    "Year",
    "Genres",
    "Num Votes",
    "Release Date",
    "Directors",
];

/// One decoded export row. Columns are matched by position, not by header
/// name; the ones ranking does not use are skipped without being parsed.
#[derive(Debug, Deserialize)]
pub(crate) struct ExportRow {
    pub external_id: String,
    pub your_rating: Option<i32>,
    _date_rated: IgnoredAny,
    pub title: String,
    _url: IgnoredAny,
    pub title_type: String,
    pub imdb_rating: Option<f64>,
    _runtime_mins: IgnoredAny,
    pub year: Option<i32>,
    _genres: IgnoredAny,
    _num_votes: IgnoredAny,
    _release_date: IgnoredAny,
    _directors: IgnoredAny,
}

impl ExportRow {
    /// Validate required columns and build the record. `line` is the
    /// 1-based line number used in errors.
    pub fn into_record(self, line: u64) -> Result<MovieRecord, IngestError> {
        let your_rating = required(self.your_rating, line, COLUMN_NAMES[1])?;
        let imdb_rating = required(self.imdb_rating, line, COLUMN_NAMES[6])?;
        let year = required(self.year, line, COLUMN_NAMES[8])?;

        if self.title_type.trim().is_empty() {
            return Err(IngestError::MissingField {
                line,
                column: COLUMN_NAMES[5],
            });
        }
        if !imdb_rating.is_finite() {
            return Err(IngestError::InvalidValue {
                line,
                column: COLUMN_NAMES[6],
                value: imdb_rating.to_string(),
            });
        }

        let external_id = ExternalId::new(self.external_id)
            .map_err(|source| IngestError::Model { line, source })?;

        MovieRecord::new(
            external_id,
            self.title,
            year,
            your_rating,
            imdb_rating,
            TitleType::from(self.title_type.as_str()),
        )
        .map_err(|source| IngestError::Model { line, source })
    }
}

fn required<T>(
    value: Option<T>,
    line: u64,
    column: &'static str,
) -> Result<T, IngestError> {
    value.ok_or(IngestError::MissingField { line, column })
}
