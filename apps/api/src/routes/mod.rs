pub mod health;

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::roadmap::handlers as roadmap_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis API
        .route("/api/v1/analyze", post(analysis_handlers::handle_analyze))
        // Roadmap API
        .route(
            "/api/v1/roadmaps",
            post(roadmap_handlers::handle_generate_roadmap)
                .get(roadmap_handlers::handle_list_roadmaps),
        )
        .route(
            "/api/v1/roadmaps/:id",
            delete(roadmap_handlers::handle_delete_roadmap),
        )
        .with_state(state)
}
