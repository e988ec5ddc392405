//! Decoding of the personal ratings CSV export.
//!
//! The export is a comma-separated file with a header row followed by one row
//! per rated title, always in the same 13-column order (see
//! [`COLUMN_NAMES`]). Every row becomes a [`MovieRecord`] regardless of its
//! title type; narrowing to movies is the filter's job. A non-movie row that
//! cannot be decoded is excluded instead of being treated as malformed, since
//! it would never be ranked anyway.

mod row;

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use reelrank_model::{MovieRecord, TitleType};
use tracing::{debug, info, instrument, warn};

use crate::config::{IngestOptions, MalformedRows};
use crate::error::IngestError;

pub use row::{COLUMN_NAMES, EXPORT_COLUMNS};
use row::ExportRow;

/// Outcome of decoding an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IngestReport {
    /// Decoded records in file order
    pub records: Vec<MovieRecord>,
    /// Data rows seen, header excluded
    pub rows_read: usize,
    /// Rows dropped under [`MalformedRows::Skip`]
    pub rows_skipped: usize,
    /// Non-movie rows dropped because they could not be decoded
    pub rows_excluded: usize,
}

/// Decode an export from any reader.
#[instrument(skip_all, fields(has_headers = options.has_headers))]
pub fn read_export<R: Read>(
    reader: R,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(options.has_headers)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut report = IngestReport::default();
    let mut raw = StringRecord::new();

    loop {
        match csv.read_record(&mut raw) {
            Ok(false) => break,
            Ok(true) => {}
            // The reader has already consumed a row that is not valid UTF-8
            Err(err) if matches!(err.kind(), csv::ErrorKind::Utf8 { .. }) => {
                report.rows_read += 1;
                let line = err
                    .position()
                    .map(|p| p.line())
                    .unwrap_or(report.rows_read as u64);
                reject(&mut report, options, line, err.into())?;
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        report.rows_read += 1;
        let line = raw
            .position()
            .map(|p| p.line())
            .unwrap_or(report.rows_read as u64);

        match decode(&raw, line) {
            Ok(Some(record)) => report.records.push(record),
            Ok(None) => report.rows_excluded += 1,
            Err(err) => reject(&mut report, options, line, err)?,
        }
    }

    info!(
        rows = report.rows_read,
        records = report.records.len(),
        skipped = report.rows_skipped,
        excluded = report.rows_excluded,
        "decoded ratings export"
    );
    Ok(report)
}

/// Decode an export file.
pub fn read_export_path(
    path: impl AsRef<Path>,
    options: &IngestOptions,
) -> Result<IngestReport, IngestError> {
    let path = path.as_ref();
    debug!(path = %path.display(), "opening ratings export");
    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_export(file, options)
}

fn reject(
    report: &mut IngestReport,
    options: &IngestOptions,
    line: u64,
    err: IngestError,
) -> Result<(), IngestError> {
    match options.malformed_rows {
        MalformedRows::Fail => Err(err),
        MalformedRows::Skip => {
            warn!(line, error = %err, "skipping malformed row");
            report.rows_skipped += 1;
            Ok(())
        }
    }
}

/// Decode one row. `Ok(None)` means the row is a non-movie that failed to
/// decode and is left out.
fn decode(
    raw: &StringRecord,
    line: u64,
) -> Result<Option<MovieRecord>, IngestError> {
    if raw.len() != EXPORT_COLUMNS {
        return Err(IngestError::ColumnCount {
            line,
            expected: EXPORT_COLUMNS,
            found: raw.len(),
        });
    }

    let title_type = raw.get(5).unwrap_or_default();
    let excludable =
        !title_type.is_empty() && !TitleType::from(title_type).is_movie();

    match decode_row(raw, line) {
        Ok(record) => Ok(Some(record)),
        Err(err) if excludable => {
            debug!(
                line,
                title_type,
                error = %err,
                "excluding undecodable non-movie row"
            );
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

fn decode_row(
    raw: &StringRecord,
    line: u64,
) -> Result<MovieRecord, IngestError> {
    let row: ExportRow = raw.deserialize(None).map_err(|err| {
        let field = match err.kind() {
            csv::ErrorKind::Deserialize { err: de, .. } => de.field(),
            _ => None,
        };
        match field.map(|f| f as usize) {
            Some(i) if i < EXPORT_COLUMNS => IngestError::InvalidValue {
                line,
                column: COLUMN_NAMES[i],
                value: raw.get(i).unwrap_or_default().to_string(),
            },
            _ => IngestError::Csv(err),
        }
    })?;

    row.into_record(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Const,Your Rating,Date Rated,Title,URL,Title Type,IMDb Rating,Runtime (mins),Year,Genres,Num Votes,Release Date,Directors";

    fn export(rows: &[&str]) -> String {
        let mut out = String::from(HEADER);
        for row in rows {
            out.push('\n');
            out.push_str(row);
        }
        out.push('\n');
        out
    }

    #[test]
    fn decodes_rows_by_position() {
        let data = export(&[
            r#"tt0111161,10,2020-01-01,The Shawshank Redemption,https://www.imdb.com/title/tt0111161/,movie,9.3,142,1994,Drama,2500000,1994-09-23,Frank Darabont"#,
            r#"tt0959621,8,2020-01-02,Pilot,https://www.imdb.com/title/tt0959621/,tvEpisode,8.2,58,2008,"Crime, Drama",30000,2008-01-20,Vince Gilligan"#,
        ]);

        let report =
            read_export(data.as_bytes(), &IngestOptions::default()).unwrap();

        assert_eq!(report.rows_read, 2);
        assert_eq!(report.rows_skipped, 0);
        let first = &report.records[0];
        assert_eq!(first.external_id().as_str(), "tt0111161");
        assert_eq!(first.title(), "The Shawshank Redemption");
        assert_eq!(first.viewer_rating(), 10);
        assert_eq!(first.public_rating(), 9.3);
        assert_eq!(first.year(), 1994);
        assert!(first.is_movie());
        assert_eq!(report.records[1].title_type(), &TitleType::TvEpisode);
    }

    #[test]
    fn empty_optional_metadata_is_fine() {
        let data = export(&["tt1,7,,Untitled,,movie,6.5,,2015,,,,"]);
        let report =
            read_export(data.as_bytes(), &IngestOptions::default()).unwrap();
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].year(), 2015);
    }

    #[test]
    fn header_only_export_is_empty() {
        let report =
            read_export(export(&[]).as_bytes(), &IngestOptions::default())
                .unwrap();
        assert_eq!(report, IngestReport::default());
    }

    #[test]
    fn wrong_column_count_names_the_line() {
        let data = export(&["tt1,7,,Short row,,movie"]);
        let err = read_export(data.as_bytes(), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::ColumnCount {
                line: 2,
                expected: 13,
                found: 6
            }
        ));
    }

    #[test]
    fn non_numeric_rating_is_invalid_value() {
        let data = export(&["tt1,great,,A,,movie,6.5,,2015,,,,"]);
        let err = read_export(data.as_bytes(), &IngestOptions::default())
            .unwrap_err();
        match err {
            IngestError::InvalidValue {
                line,
                column,
                value,
            } => {
                assert_eq!(line, 2);
                assert_eq!(column, "Your Rating");
                assert_eq!(value, "great");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_public_rating_is_reported() {
        let data = export(&["tt1,7,,A,,movie,,,2015,,,,"]);
        let err = read_export(data.as_bytes(), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::MissingField {
                line: 2,
                column: "IMDb Rating"
            }
        ));
    }

    #[test]
    fn skip_policy_drops_bad_rows_and_counts_them() {
        let data = export(&[
            "tt1,7,,Good,,movie,6.5,,2015,,,,",
            "tt2,7,,Bad,,movie,,,2015,,,,",
            "tt3,oops",
            "tt4,9,,Also good,,movie,8.0,,2016,,,,",
        ]);
        let report =
            read_export(data.as_bytes(), &IngestOptions::skipping_malformed())
                .unwrap();

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_skipped, 2);
        let ids: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.external_id().as_str())
            .collect();
        assert_eq!(ids, vec!["tt1", "tt4"]);
    }

    #[test]
    fn incomplete_non_movie_rows_are_excluded_not_malformed() {
        let data = export(&[
            "tt1,7,,Good,,movie,6.5,,2015,,,,",
            "tt2,8,,Some Episode,,podcastEpisode,,30,2020,,,,",
            "tt3,6,,Upcoming,,tvSeries,n/a,,,,,,",
            "tt4,9,,Also good,,movie,8.0,,2016,,,,",
        ]);
        let report =
            read_export(data.as_bytes(), &IngestOptions::default()).unwrap();

        assert_eq!(report.rows_read, 4);
        assert_eq!(report.rows_excluded, 2);
        assert_eq!(report.rows_skipped, 0);
        assert_eq!(report.records.len(), 2);
        assert!(report.records.iter().all(MovieRecord::is_movie));
    }

    #[test]
    fn invalid_utf8_row_follows_policy() {
        let mut data =
            export(&["tt1,7,,Good,,movie,6.5,,2015,,,,"]).into_bytes();
        data.extend_from_slice(b"tt2,7,,Bad \xff title,,movie,6.5,,2015,,,,\n");
        data.extend_from_slice(b"tt3,9,,Also good,,movie,8.0,,2016,,,,\n");

        let err = read_export(data.as_slice(), &IngestOptions::default())
            .unwrap_err();
        assert!(matches!(err, IngestError::Csv(_)));

        let report =
            read_export(data.as_slice(), &IngestOptions::skipping_malformed())
                .unwrap();
        assert_eq!(report.rows_read, 3);
        assert_eq!(report.rows_skipped, 1);
        let ids: Vec<&str> = report
            .records
            .iter()
            .map(|r| r.external_id().as_str())
            .collect();
        assert_eq!(ids, vec!["tt1", "tt3"]);
    }

    #[test]
    fn headerless_input_keeps_first_row() {
        let data = "tt1,7,,A,,movie,6.5,,2015,,,,\n";
        let options = IngestOptions {
            has_headers: false,
            ..IngestOptions::default()
        };
        let report = read_export(data.as_bytes(), &options).unwrap();
        assert_eq!(report.records.len(), 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_export_path(
            dir.path().join("nope.csv"),
            &IngestOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }
}
