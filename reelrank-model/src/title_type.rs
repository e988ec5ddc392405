use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Classification of an exported title.
///
/// Exports have used both the camel-case identifiers (`tvEpisode`) and the
/// display labels (`TV Episode`); parsing accepts either, ignoring case and
/// whitespace. Unknown labels are preserved verbatim in [`TitleType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum TitleType {
    /// Theatrical feature; the only classification that gets ranked
    Movie,
    TvMovie,
    TvSeries,
    TvMiniSeries,
    TvEpisode,
    TvSpecial,
    TvShort,
    Short,
    Video,
    VideoGame,
    PodcastSeries,
    PodcastEpisode,
    Other(String),
}

impl TitleType {
    /// Whether records of this type take part in ranking.
    pub fn is_movie(&self) -> bool {
        matches!(self, TitleType::Movie)
    }

    /// Canonical camel-case label.
    pub fn as_str(&self) -> &str {
        match self {
            TitleType::Movie => "movie",
            TitleType::TvMovie => "tvMovie",
            TitleType::TvSeries => "tvSeries",
            TitleType::TvMiniSeries => "tvMiniSeries",
            TitleType::TvEpisode => "tvEpisode",
            TitleType::TvSpecial => "tvSpecial",
            TitleType::TvShort => "tvShort",
            TitleType::Short => "short",
            TitleType::Video => "video",
            TitleType::VideoGame => "videoGame",
            TitleType::PodcastSeries => "podcastSeries",
            TitleType::PodcastEpisode => "podcastEpisode",
            TitleType::Other(label) => label.as_str(),
        }
    }
}

impl FromStr for TitleType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();

        Ok(match normalized.as_str() {
            "movie" => TitleType::Movie,
            "tvmovie" => TitleType::TvMovie,
            "tvseries" => TitleType::TvSeries,
            "tvminiseries" => TitleType::TvMiniSeries,
            "tvepisode" => TitleType::TvEpisode,
            "tvspecial" => TitleType::TvSpecial,
            "tvshort" => TitleType::TvShort,
            "short" => TitleType::Short,
            "video" => TitleType::Video,
            "videogame" => TitleType::VideoGame,
            "podcastseries" => TitleType::PodcastSeries,
            "podcastepisode" => TitleType::PodcastEpisode,
            _ => TitleType::Other(s.trim().to_string()),
        })
    }
}

impl From<&str> for TitleType {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(title_type) => title_type,
            Err(never) => match never {},
        }
    }
}

impl Display for TitleType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
