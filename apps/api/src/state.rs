use std::sync::Arc;

use crate::insights::service::InsightService;
use crate::profile::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generation + cache policy for industry insights. Owns the model client and insight store.
    pub insights: InsightService,
    pub profiles: Arc<dyn ProfileStore>,
}
