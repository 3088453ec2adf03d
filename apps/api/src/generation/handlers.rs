//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::banner::{generate_header_image, BannerPalette};
use crate::generation::chat::{send_chat_turn, ChatRequest, ChatResponse};
use crate::generation::generator::{generate_recruitment_package, GenerateRequest};
use crate::generation::package::RecruitmentPackage;
use crate::state::AppState;
use crate::store::handlers::NO_DRAFT;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub package: RecruitmentPackage,
    pub palette: BannerPalette,
}

#[derive(Debug, Deserialize)]
pub struct BannerRequest {
    pub package: RecruitmentPackage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerResponse {
    /// The input package, with `headerImageUrl` set when an image was produced.
    pub package: RecruitmentPackage,
    pub palette: BannerPalette,
    pub css_background: String,
    pub image_generated: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/packages/generate
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, AppError> {
    let package = generate_recruitment_package(&state.llm, &request).await?;
    let palette = BannerPalette::from_title(&package.job_title);
    Ok(Json(GenerateResponse { package, palette }))
}

/// POST /api/v1/drafts/manual/generate
///
/// Generates from the manually saved draft instead of a request body.
pub async fn handle_generate_from_draft(
    State(state): State<AppState>,
) -> Result<Json<GenerateResponse>, AppError> {
    let stored = state
        .drafts
        .load_manual_draft()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_DRAFT.to_string()))?;
    let request = GenerateRequest::from(&stored.data);
    let package = generate_recruitment_package(&state.llm, &request).await?;
    let palette = BannerPalette::from_title(&package.job_title);
    Ok(Json(GenerateResponse { package, palette }))
}

/// POST /api/v1/packages/banner
///
/// Never fails on collaborator errors: without an image the gradient is the banner.
pub async fn handle_banner(
    State(state): State<AppState>,
    Json(request): Json<BannerRequest>,
) -> Result<Json<BannerResponse>, AppError> {
    let mut package = request.package;
    package
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let palette = BannerPalette::from_title(&package.job_title);
    let image = generate_header_image(&state.llm, &package.job_title).await;
    let image_generated = image.is_some();
    if let Some(url) = image {
        package.attach_header_image(url);
    }

    Ok(Json(BannerResponse {
        css_background: palette.css_background(),
        package,
        palette,
        image_generated,
    }))
}

/// POST /api/v1/chat
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let response = send_chat_turn(&state.llm, &request).await?;
    Ok(Json(response))
}
