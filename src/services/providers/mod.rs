//! Upstream collaborators behind the recommendation flow
//!
//! A completion provider turns a prompt into free text; a metadata provider
//! resolves show names and ids to canonical records. Both sit behind traits so
//! handlers and services can be exercised without the network.

use crate::{
    error::AppResult,
    models::{MediaType, MediaTypeFilter, ShowDetails, ShowSummary},
};

pub mod openai;
pub mod tmdb;

pub use openai::OpenAiProvider;
pub use tmdb::TmdbProvider;

/// Text-generation service answering recommendation prompts
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the completion text, which may be empty when the model produced nothing
    async fn complete(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Movie/TV database used to resolve candidates
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Best match for `query` among the kinds `filter` allows
    async fn search_show(&self, query: &str, filter: MediaTypeFilter)
        -> AppResult<Option<ShowSummary>>;

    /// Full details, including the trailer, for a known id
    async fn show_details(&self, id: u64, media_type: MediaType) -> AppResult<ShowDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
