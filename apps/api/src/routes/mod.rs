pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::generation::handlers as generation;
use crate::markdown::handlers as markdown;
use crate::state::AppState;
use crate::store::handlers as drafts;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Package generation
        .route(
            "/api/v1/packages/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/packages/banner", post(generation::handle_banner))
        // Export and sharing
        .route(
            "/api/v1/packages/export/pdf",
            post(export::handle_export_pdf),
        )
        .route("/api/v1/packages/share", post(export::handle_share))
        // Markdown preview
        .route("/api/v1/markdown/render", post(markdown::handle_render))
        // Assistant
        .route("/api/v1/chat", post(generation::handle_chat))
        // Persistence
        .route(
            "/api/v1/drafts/autosave",
            get(drafts::handle_get_autosave).put(drafts::handle_put_autosave),
        )
        .route(
            "/api/v1/drafts/manual",
            get(drafts::handle_get_manual_draft)
                .put(drafts::handle_put_manual_draft)
                .delete(drafts::handle_delete_manual_draft),
        )
        .route(
            "/api/v1/drafts/manual/generate",
            post(generation::handle_generate_from_draft),
        )
        .route(
            "/api/v1/results/saved",
            get(drafts::handle_get_saved_result)
                .put(drafts::handle_put_saved_result)
                .delete(drafts::handle_delete_saved_result),
        )
        .with_state(state)
}
