use crate::{
    error::{AppError, AppResult},
    models::{MediaType, MediaTypeFilter, ShowDetails, ShowSummary},
    services::providers::MetadataProvider,
};
use std::sync::Arc;

/// Service function for name lookups
///
/// Keeps HTTP routing apart from provider calls; "no match" becomes `NotFound`.
pub async fn search_show(
    provider: Arc<dyn MetadataProvider>,
    query: &str,
    filter: MediaTypeFilter,
) -> AppResult<ShowSummary> {
    provider
        .search_show(query, filter)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No show matching {:?}", query.trim())))
}

/// Service function for a single show's details
pub async fn get_show(
    provider: Arc<dyn MetadataProvider>,
    id: u64,
    media_type: MediaType,
) -> AppResult<ShowDetails> {
    if id == 0 {
        return Err(AppError::InvalidInput("Show id must be at least 1".to_string()));
    }
    provider.show_details(id, media_type).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::MockMetadataProvider;

    #[tokio::test]
    async fn test_get_show_rejects_zero_id() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_show_details().never();

        let result = get_show(Arc::new(provider), 0, MediaType::Tv).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_search_without_match_is_not_found() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_search_show().returning(|_, _| Ok(None));

        let result = search_show(Arc::new(provider), "nothing", MediaTypeFilter::All).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
