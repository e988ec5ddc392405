//! Core data model definitions shared across reelrank crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod record;
pub mod summary;
pub mod title_type;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::ExternalId;
pub use record::{MovieRecord, RATING_SCALE};
pub use summary::{RankedList, Summary, YearRankings};
pub use title_type::TitleType;
