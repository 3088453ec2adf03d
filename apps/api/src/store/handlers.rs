//! Axum route handlers for drafts and saved results.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::AppError;
use crate::generation::package::RecruitmentPackage;
use crate::models::form::DraftForm;
use crate::state::AppState;
use crate::store::drafts::Stored;

pub const DRAFT_SAVED: &str = "Draft saved successfully!";
pub const DRAFT_LOADED: &str = "Draft loaded!";
pub const NO_DRAFT: &str = "No saved draft found.";
pub const RESULT_SAVED: &str = "Result saved!";
pub const RESULT_LOADED: &str = "Result loaded!";
pub const NO_RESULT: &str = "No saved result found.";
pub const DRAFT_CLEARED: &str = "Draft cleared.";
pub const RESULT_CLEARED: &str = "Saved result cleared.";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedResponse {
    pub message: &'static str,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoadedResponse<T> {
    pub message: &'static str,
    #[serde(flatten)]
    pub stored: Stored<T>,
}

/// GET /api/v1/drafts/autosave
///
/// Always succeeds: with nothing saved the form comes back empty.
pub async fn handle_get_autosave(
    State(state): State<AppState>,
) -> Result<Json<Stored<DraftForm>>, AppError> {
    let stored = state.drafts.load_autosave().await?.unwrap_or(Stored {
        version: 0,
        saved_at: None,
        data: DraftForm::default(),
    });
    Ok(Json(stored))
}

/// PUT /api/v1/drafts/autosave
pub async fn handle_put_autosave(
    State(state): State<AppState>,
    Json(form): Json<DraftForm>,
) -> Result<Json<SavedResponse>, AppError> {
    let saved_at = state.drafts.autosave(&form).await?;
    Ok(Json(SavedResponse {
        message: "Saved",
        saved_at,
    }))
}

/// GET /api/v1/drafts/manual
pub async fn handle_get_manual_draft(
    State(state): State<AppState>,
) -> Result<Json<LoadedResponse<DraftForm>>, AppError> {
    let stored = state
        .drafts
        .load_manual_draft()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_DRAFT.to_string()))?;
    Ok(Json(LoadedResponse {
        message: DRAFT_LOADED,
        stored,
    }))
}

/// PUT /api/v1/drafts/manual
pub async fn handle_put_manual_draft(
    State(state): State<AppState>,
    Json(form): Json<DraftForm>,
) -> Result<Json<SavedResponse>, AppError> {
    let saved_at = state.drafts.save_manual_draft(&form).await?;
    Ok(Json(SavedResponse {
        message: DRAFT_SAVED,
        saved_at,
    }))
}

/// DELETE /api/v1/drafts/manual
pub async fn handle_delete_manual_draft(
    State(state): State<AppState>,
) -> Result<Json<ClearedResponse>, AppError> {
    state.drafts.clear_manual_draft().await?;
    Ok(Json(ClearedResponse {
        message: DRAFT_CLEARED,
    }))
}

/// GET /api/v1/results/saved
pub async fn handle_get_saved_result(
    State(state): State<AppState>,
) -> Result<Json<LoadedResponse<RecruitmentPackage>>, AppError> {
    let stored = state
        .drafts
        .load_result()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_RESULT.to_string()))?;
    Ok(Json(LoadedResponse {
        message: RESULT_LOADED,
        stored,
    }))
}

/// PUT /api/v1/results/saved
pub async fn handle_put_saved_result(
    State(state): State<AppState>,
    Json(package): Json<RecruitmentPackage>,
) -> Result<Json<SavedResponse>, AppError> {
    package
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let saved_at = state.drafts.save_result(&package).await?;
    Ok(Json(SavedResponse {
        message: RESULT_SAVED,
        saved_at,
    }))
}

/// DELETE /api/v1/results/saved
pub async fn handle_delete_saved_result(
    State(state): State<AppState>,
) -> Result<Json<ClearedResponse>, AppError> {
    state.drafts.clear_result().await?;
    Ok(Json(ClearedResponse {
        message: RESULT_CLEARED,
    }))
}
