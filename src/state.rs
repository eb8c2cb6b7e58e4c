use std::sync::Arc;

use crate::services::providers::CompletionProvider;
use crate::services::RecommendationEngine;
use crate::storage::CatalogStore;

/// Shared application state
///
/// The store and the recommendation engine are constructed once at startup
/// and injected here; handlers receive cheap clones of the Arc handles.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CatalogStore>,
    pub recommender: Arc<RecommendationEngine>,
}

impl AppState {
    /// Wires the state from its injected dependencies.
    pub fn new(store: Arc<dyn CatalogStore>, provider: Arc<dyn CompletionProvider>) -> Self {
        let recommender = Arc::new(RecommendationEngine::new(store.clone(), provider));
        Self { store, recommender }
    }
}
