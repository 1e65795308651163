use serde::{Deserialize, Serialize};

use super::MediaType;

// ============================================================================
// Client-facing types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: Option<String>,
}

/// Best search match for a candidate name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: u64,
    pub name: String,
    pub media_type: MediaType,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
}

/// Full record for one show, including its trailer when there is one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowDetails {
    pub id: u64,
    pub name: String,
    pub media_type: MediaType,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub homepage: Option<String>,
    pub release_date: Option<String>,
    pub runtime: Option<u32>,
    pub genres: Vec<Genre>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    /// YouTube key of the first official-looking trailer
    pub trailer_key: Option<String>,
}

impl ShowDetails {
    pub fn summary(&self) -> ShowSummary {
        ShowSummary {
            id: self.id,
            name: self.name.clone(),
            media_type: self.media_type,
            overview: self.overview.clone(),
            poster_path: self.poster_path.clone(),
            backdrop_path: self.backdrop_path.clone(),
            vote_average: self.vote_average,
            vote_count: self.vote_count,
        }
    }
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Response from GET /3/search/{tv,movie,multi}
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchResult>,
}

/// TV results carry `name`, movie results carry `title`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(alias = "title")]
    pub name: Option<String>,
    /// Only present on multi search
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

impl TmdbSearchResult {
    /// Converts a result, taking the kind from the result itself or from the endpoint searched
    ///
    /// Returns `None` for people and other non-title results.
    pub fn into_summary(self, searched: Option<MediaType>) -> Option<ShowSummary> {
        let media_type = match self.media_type.as_deref() {
            Some(kind) => kind.parse().ok()?,
            None => searched?,
        };

        Some(ShowSummary {
            id: self.id,
            name: self.name?,
            media_type,
            overview: self.overview,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
        })
    }
}

/// Response from GET /3/{tv,movie}/{id}?append_to_response=videos
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbDetails {
    pub id: u64,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default, alias = "first_air_date")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
    #[serde(default)]
    pub official: bool,
    #[serde(default)]
    pub name: Option<String>,
}

impl TmdbDetails {
    pub fn into_details(self, media_type: MediaType) -> ShowDetails {
        let trailer_key = self.videos.as_ref().and_then(|videos| {
            let trailers = || {
                videos
                    .results
                    .iter()
                    .filter(|v| v.site == "YouTube" && v.video_type == "Trailer")
            };
            trailers()
                .find(|v| v.official)
                .or_else(|| trailers().next())
                .map(|v| v.key.clone())
        });

        ShowDetails {
            id: self.id,
            name: self.name,
            media_type,
            overview: self.overview,
            tagline: self.tagline,
            status: self.status,
            homepage: self.homepage,
            release_date: self.release_date,
            runtime: self.runtime,
            genres: self.genres,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            vote_average: self.vote_average,
            vote_count: self.vote_count,
            trailer_key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tv_search_result_uses_searched_kind() {
        let result: TmdbSearchResult = serde_json::from_str(
            r#"{"id": 2316, "name": "The Office", "overview": "Mockumentary", "vote_average": 8.6, "vote_count": 3100}"#,
        )
        .unwrap();

        let summary = result.into_summary(Some(MediaType::Tv)).unwrap();
        assert_eq!(summary.id, 2316);
        assert_eq!(summary.name, "The Office");
        assert_eq!(summary.media_type, MediaType::Tv);
        assert_eq!(summary.vote_count, 3100);
    }

    #[test]
    fn test_movie_search_result_reads_title() {
        let result: TmdbSearchResult =
            serde_json::from_str(r#"{"id": 550, "title": "Fight Club", "poster_path": "/a.jpg"}"#)
                .unwrap();

        let summary = result.into_summary(Some(MediaType::Movie)).unwrap();
        assert_eq!(summary.name, "Fight Club");
        assert_eq!(summary.poster_path.as_deref(), Some("/a.jpg"));
    }

    #[test]
    fn test_multi_search_skips_people() {
        let result: TmdbSearchResult =
            serde_json::from_str(r#"{"id": 31, "name": "Tom Hanks", "media_type": "person"}"#)
                .unwrap();
        assert_eq!(result.into_summary(None), None);
    }

    #[test]
    fn test_multi_search_reads_media_type() {
        let result: TmdbSearchResult =
            serde_json::from_str(r#"{"id": 1, "title": "Arrival", "media_type": "movie"}"#)
                .unwrap();
        assert_eq!(
            result.into_summary(None).unwrap().media_type,
            MediaType::Movie
        );
    }

    #[test]
    fn test_details_prefers_official_trailer() {
        let details: TmdbDetails = serde_json::from_str(
            r#"{
                "id": 66732,
                "name": "Stranger Things",
                "first_air_date": "2016-07-15",
                "genres": [{"id": 18, "name": "Drama"}],
                "videos": {"results": [
                    {"key": "clip1", "site": "YouTube", "type": "Clip", "official": true},
                    {"key": "fan", "site": "YouTube", "type": "Trailer", "official": false},
                    {"key": "real", "site": "YouTube", "type": "Trailer", "official": true}
                ]}
            }"#,
        )
        .unwrap();

        let details = details.into_details(MediaType::Tv);
        assert_eq!(details.trailer_key.as_deref(), Some("real"));
        assert_eq!(details.release_date.as_deref(), Some("2016-07-15"));
        assert_eq!(details.genres.len(), 1);
        assert_eq!(details.summary().name, "Stranger Things");
    }

    #[test]
    fn test_details_without_videos() {
        let details: TmdbDetails =
            serde_json::from_str(r#"{"id": 550, "title": "Fight Club", "runtime": 139}"#).unwrap();

        let details = details.into_details(MediaType::Movie);
        assert_eq!(details.trailer_key, None);
        assert_eq!(details.runtime, Some(139));
    }
}
