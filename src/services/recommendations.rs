use chrono::Utc;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{
        MediaType, MediaTypeFilter, RecommendationRequest, RecommendationResponse,
        RecommendedShow, ShowSummary,
    },
    parser::{GeneratedShow, ParseError, RecommendationParser, Template},
    services::{
        prompt::build_prompt,
        providers::{CompletionProvider, MetadataProvider},
    },
};

/// Generates recommendations and resolves them against the metadata provider
///
/// Flow: prompt -> completion -> parse -> media-type screening -> one metadata
/// lookup per candidate, run concurrently and reassembled in candidate order.
#[derive(Clone)]
pub struct RecommendationService {
    completion: Arc<dyn CompletionProvider>,
    metadata: Arc<dyn MetadataProvider>,
    default_template: Template,
}

impl RecommendationService {
    pub fn new(
        completion: Arc<dyn CompletionProvider>,
        metadata: Arc<dyn MetadataProvider>,
        default_template: Template,
    ) -> Self {
        Self {
            completion,
            metadata,
            default_template,
        }
    }

    pub async fn recommend(
        &self,
        request: RecommendationRequest,
    ) -> AppResult<RecommendationResponse> {
        let template = request.template.unwrap_or(self.default_template);
        let filter = request.media_type;

        let prompt = build_prompt(&request.shows, filter, template)?;
        let text = self.completion.complete(&prompt).await?;

        let parsed = RecommendationParser::new(template)
            .expecting(filter)
            .parse(&text)
            .map_err(|e: ParseError| {
                tracing::error!(
                    provider = self.completion.name(),
                    template = %template,
                    "Completion produced no usable text"
                );
                AppError::from(e)
            })?;

        let candidate_count = parsed.shows.len();
        let unrecognized = parsed.unrecognized_media_types().len();
        let mut kept = Vec::with_capacity(candidate_count);
        for candidate in parsed.shows {
            if let Some(media_type) = screen(&candidate, filter) {
                kept.push((candidate, media_type));
            }
        }
        let skipped = candidate_count - kept.len();

        let recommendations = self.resolve_all(kept).await;

        tracing::info!(
            template = %template,
            candidates = candidate_count,
            skipped = skipped,
            unrecognized = unrecognized,
            resolved = recommendations.iter().filter(|r| r.metadata.is_some()).count(),
            mismatched_lines = parsed.field_mismatches.len(),
            "Recommendations generated"
        );

        Ok(RecommendationResponse {
            recommendations,
            template,
            skipped,
            field_mismatches: parsed.field_mismatches,
            generated_at: Utc::now(),
        })
    }

    /// Resolves candidates in parallel, keeping their original order
    async fn resolve_all(
        &self,
        candidates: Vec<(GeneratedShow, Option<MediaType>)>,
    ) -> Vec<RecommendedShow> {
        let mut tasks = Vec::with_capacity(candidates.len());

        for (candidate, media_type) in candidates {
            let metadata = Arc::clone(&self.metadata);
            let lookup = candidate.clone();
            let task =
                tokio::spawn(async move { resolve(metadata.as_ref(), &lookup, media_type).await });
            tasks.push((candidate, media_type, task));
        }

        let mut results = Vec::with_capacity(tasks.len());
        let mut failures = 0usize;

        for (candidate, media_type, task) in tasks {
            let metadata = match task.await {
                Ok(Ok(summary)) => summary,
                Ok(Err(e)) => {
                    failures += 1;
                    tracing::warn!(
                        error = %e,
                        name = ?candidate.name,
                        provider = self.metadata.name(),
                        "Metadata lookup failed for candidate"
                    );
                    None
                }
                Err(e) => {
                    failures += 1;
                    tracing::error!(error = %e, "Task join error");
                    None
                }
            };

            let resolved_media_type = media_type.or(metadata.as_ref().map(|m| m.media_type));

            results.push(RecommendedShow {
                candidate,
                resolved_media_type,
                metadata,
            });
        }

        if failures > 0 {
            tracing::warn!(
                success_count = results.len() - failures,
                error_count = failures,
                "Partial metadata resolution failure"
            );
        }

        results
    }
}

/// Decides whether a candidate survives the request filter
///
/// Returns `None` to drop the candidate, otherwise the media kind to resolve it
/// with (`Some(None)` when the kind is unknown and the filter allows both).
fn screen(candidate: &GeneratedShow, filter: MediaTypeFilter) -> Option<Option<MediaType>> {
    match candidate.media_kind() {
        Ok(Some(kind)) if filter.accepts(kind) => Some(Some(kind)),
        Ok(Some(kind)) => {
            tracing::debug!(
                name = ?candidate.name,
                media_type = %kind,
                "Dropping candidate outside requested media type"
            );
            None
        }
        Ok(None) => Some(filter.only()),
        Err(e) => {
            tracing::warn!(
                name = ?candidate.name,
                error = %e,
                "Candidate has unrecognized media type"
            );
            Some(filter.only())
        }
    }
}

/// Looks a candidate up by identifier when it has one, otherwise by name
async fn resolve(
    metadata: &dyn MetadataProvider,
    candidate: &GeneratedShow,
    media_type: Option<MediaType>,
) -> AppResult<Option<ShowSummary>> {
    if let (Some(id), Some(kind)) = (candidate.numeric_id(), media_type) {
        let details = metadata.show_details(id, kind).await?;
        return Ok(Some(details.summary()));
    }

    match candidate.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => {
            let filter = media_type.map_or(MediaTypeFilter::All, MediaTypeFilter::from);
            metadata.search_show(name, filter).await
        }
        _ => Ok(None),
    }
}
