use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

use crate::parser::{FieldMismatch, GeneratedShow, Template};

pub mod tmdb;

pub use tmdb::{Genre, ShowDetails, ShowSummary, Video};

/// Kind of title known to the metadata provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Tv,
    Movie,
}

impl MediaType {
    /// Path segment used by the metadata provider
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Tv => "tv",
            MediaType::Movie => "movie",
        }
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized media-type token that is neither `tv` nor `movie`
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized media type: {0:?}")]
pub struct UnrecognizedMediaType(pub String);

impl FromStr for MediaType {
    type Err = UnrecognizedMediaType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tv" => Ok(MediaType::Tv),
            "movie" => Ok(MediaType::Movie),
            other => Err(UnrecognizedMediaType(other.to_string())),
        }
    }
}

/// Media kinds the user asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaTypeFilter {
    Tv,
    Movie,
    #[default]
    All,
}

impl MediaTypeFilter {
    pub fn accepts(&self, media_type: MediaType) -> bool {
        match self {
            MediaTypeFilter::Tv => media_type == MediaType::Tv,
            MediaTypeFilter::Movie => media_type == MediaType::Movie,
            MediaTypeFilter::All => true,
        }
    }

    /// The single kind this filter allows, if it allows only one
    pub fn only(&self) -> Option<MediaType> {
        match self {
            MediaTypeFilter::Tv => Some(MediaType::Tv),
            MediaTypeFilter::Movie => Some(MediaType::Movie),
            MediaTypeFilter::All => None,
        }
    }
}

impl From<MediaType> for MediaTypeFilter {
    fn from(media_type: MediaType) -> Self {
        match media_type {
            MediaType::Tv => MediaTypeFilter::Tv,
            MediaType::Movie => MediaTypeFilter::Movie,
        }
    }
}

/// Request to generate recommendations from shows the user likes
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationRequest {
    /// One show, or several separated by commas
    pub shows: String,
    #[serde(default)]
    pub media_type: MediaTypeFilter,
    /// Line template to prompt with; the configured default when absent
    #[serde(default)]
    pub template: Option<Template>,
}

/// A parsed candidate together with what the metadata provider knows about it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedShow {
    #[serde(flatten)]
    pub candidate: GeneratedShow,
    /// Media kind used for resolution, after validation against the request filter
    pub resolved_media_type: Option<MediaType>,
    /// `None` when the lookup found nothing or failed
    pub metadata: Option<ShowSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendedShow>,
    pub template: Template,
    /// Candidates dropped because their media type was excluded by the request
    pub skipped: usize,
    pub field_mismatches: Vec<FieldMismatch>,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_str() {
        assert_eq!("tv".parse::<MediaType>(), Ok(MediaType::Tv));
        assert_eq!(" Movie ".parse::<MediaType>(), Ok(MediaType::Movie));
        assert_eq!(
            "series".parse::<MediaType>(),
            Err(UnrecognizedMediaType("series".to_string()))
        );
    }

    #[test]
    fn test_media_type_display() {
        assert_eq!(MediaType::Tv.to_string(), "tv");
        assert_eq!(MediaType::Movie.to_string(), "movie");
    }

    #[test]
    fn test_filter_accepts() {
        assert!(MediaTypeFilter::All.accepts(MediaType::Tv));
        assert!(MediaTypeFilter::All.accepts(MediaType::Movie));
        assert!(MediaTypeFilter::Tv.accepts(MediaType::Tv));
        assert!(!MediaTypeFilter::Tv.accepts(MediaType::Movie));
        assert!(!MediaTypeFilter::Movie.accepts(MediaType::Tv));
    }

    #[test]
    fn test_filter_serde() {
        let filter: MediaTypeFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(filter, MediaTypeFilter::All);
        assert_eq!(serde_json::to_string(&MediaTypeFilter::Tv).unwrap(), "\"tv\"");
    }

    #[test]
    fn test_recommendation_request_defaults() {
        let request: RecommendationRequest =
            serde_json::from_str(r#"{"shows": "The Office"}"#).unwrap();
        assert_eq!(request.media_type, MediaTypeFilter::All);
        assert_eq!(request.template, None);
    }

    #[test]
    fn test_recommended_show_flattens_candidate() {
        let show = RecommendedShow {
            candidate: GeneratedShow {
                name: Some("Dark".to_string()),
                description: None,
                media_type: Some("tv".to_string()),
                identifier: None,
            },
            resolved_media_type: Some(MediaType::Tv),
            metadata: None,
        };

        let json = serde_json::to_value(&show).unwrap();
        assert_eq!(json["name"], "Dark");
        assert!(json["description"].is_null());
        assert_eq!(json["resolved_media_type"], "tv");
    }
}
