use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::roadmap::store::RoadmapStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Persistence boundary for roadmaps. Handlers never touch the pool
    /// directly; tests substitute an in-memory fake.
    pub roadmaps: Arc<dyn RoadmapStore>,
    pub config: Config,
}
