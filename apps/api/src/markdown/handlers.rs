//! Axum route handlers for the Markdown API.

use axum::Json;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::markdown::html::render_html;
use crate::markdown::{interpret, Document};

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub source: String,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub document: Document,
    pub html: String,
    /// Plain-text rows with emphasis dropped, for copying.
    pub text: String,
}

/// POST /api/v1/markdown/render
///
/// Interprets the source and returns both the block model and its HTML view.
pub async fn handle_render(
    Json(request): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, AppError> {
    let document = interpret(&request.source);
    let html = render_html(&document);
    let text = document.text_rows().join("\n");
    Ok(Json(RenderResponse {
        document,
        html,
        text,
    }))
}
