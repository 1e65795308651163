//! TMDB metadata provider
//!
//! API Flow:
//! 1. Name lookup: /3/search/{tv,movie,multi} -> first title result wins
//! 2. Details: /3/{tv,movie}/{id}?append_to_response=videos -> details + trailer
//!
//! Lookups go through the Redis cache when one is configured.

use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{
        tmdb::{TmdbDetails, TmdbSearchResponse},
        MediaType, MediaTypeFilter, ShowDetails, ShowSummary,
    },
    services::providers::MetadataProvider,
};

const SEARCH_CACHE_TTL: u64 = 86400; // 1 day
const DETAILS_CACHE_TTL: u64 = 604800; // 1 week

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Option<Cache>,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, cache: Option<Cache>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            cache,
        }
    }

    async fn fetch_search(
        &self,
        query: &str,
        filter: MediaTypeFilter,
    ) -> AppResult<Option<ShowSummary>> {
        let searched = filter.only();
        let endpoint = searched.map_or("multi", |kind| kind.as_str());
        let url = format!("{}/3/search/{}", self.api_url, endpoint);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("query", query),
                ("language", "en-US"),
                ("include_adult", "false"),
                ("page", "1"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let search: TmdbSearchResponse = response.json().await?;
        let total = search.results.len();

        let best = search
            .results
            .into_iter()
            .find_map(|result| result.into_summary(searched));

        tracing::info!(
            query = %query,
            endpoint = endpoint,
            results = total,
            matched = best.is_some(),
            provider = "tmdb",
            "Show search completed"
        );

        Ok(best)
    }

    async fn fetch_details(&self, id: u64, media_type: MediaType) -> AppResult<ShowDetails> {
        let url = format!("{}/3/{}/{}", self.api_url, media_type, id);

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
                ("append_to_response", "videos"),
            ])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "No {} found with id {}",
                media_type, id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let response_text = response.text().await?;
        let details: TmdbDetails = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize TMDB response"
            );
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })?;

        let details = details.into_details(media_type);

        tracing::info!(
            id = id,
            media_type = %media_type,
            has_trailer = details.trailer_key.is_some(),
            provider = "tmdb",
            "Show details fetched"
        );

        Ok(details)
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_show(
        &self,
        query: &str,
        filter: MediaTypeFilter,
    ) -> AppResult<Option<ShowSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::ShowSearch {
                    filter,
                    query: query.to_string(),
                },
                SEARCH_CACHE_TTL,
                self.fetch_search(query, filter)
            ),
            None => self.fetch_search(query, filter).await,
        }
    }

    async fn show_details(&self, id: u64, media_type: MediaType) -> AppResult<ShowDetails> {
        match &self.cache {
            Some(cache) => cached!(
                cache,
                CacheKey::ShowDetails { media_type, id },
                DETAILS_CACHE_TTL,
                self.fetch_details(id, media_type)
            ),
            None => self.fetch_details(id, media_type).await,
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
