use std::sync::Arc;

use crate::services::detail::DetailService;

/// Shared application state
///
/// Everything here is immutable after startup (datasets are loaded exactly
/// once), so plain `Arc`s are enough and handlers never lock.
#[derive(Clone)]
pub struct AppState {
    pub detail_service: Arc<DetailService>,
    /// Recommendation count used when a request does not pass `limit`
    pub default_limit: usize,
}

impl AppState {
    pub fn new(detail_service: Arc<DetailService>, default_limit: usize) -> Self {
        Self {
            detail_service,
            default_limit,
        }
    }
}
