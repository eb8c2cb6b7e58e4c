pub mod providers;
pub mod recommendations;

pub use recommendations::{RecommendationEngine, Recommendations, RecommendationSource};
