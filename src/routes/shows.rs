use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{MediaType, MediaTypeFilter, ShowDetails, ShowSummary},
    routes::AppState,
    services::shows,
};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    #[serde(default)]
    media_type: MediaTypeFilter,
}

/// Handler for show search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<ShowSummary>> {
    let show = shows::search_show(state.metadata.clone(), &params.q, params.media_type).await?;
    Ok(Json(show))
}

/// Handler for show details endpoint
pub async fn get_show(
    State(state): State<Arc<AppState>>,
    Path((media_type, id)): Path<(MediaType, u64)>,
) -> AppResult<Json<ShowDetails>> {
    let show = shows::get_show(state.metadata.clone(), id, media_type).await?;
    Ok(Json(show))
}
