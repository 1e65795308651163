pub mod prompt;
pub mod providers;
pub mod recommendations;
pub mod shows;

pub use recommendations::RecommendationService;
