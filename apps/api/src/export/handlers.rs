//! Axum route handlers for PDF export and sharing.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::errors::AppError;
use crate::export::export_filename;
use crate::export::share::ShareBundle;
use crate::generation::package::RecruitmentPackage;
use crate::layout::{compose_package, render_pdf, ExportError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ShareRequest {
    pub package: RecruitmentPackage,
}

/// POST /api/v1/packages/export/pdf
///
/// Composes and renders on the blocking pool. The response is the PDF itself,
/// offered as a download named after the job title.
pub async fn handle_export_pdf(
    State(state): State<AppState>,
    Json(package): Json<RecruitmentPackage>,
) -> Result<Response, AppError> {
    package
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let filename = export_filename(&package.job_title);
    let page_config = state.page_config.clone();

    let bytes = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ExportError> {
        let composed = compose_package(&package, &page_config)?;
        Ok(render_pdf(&composed))
    })
    .await
    .map_err(|e| ExportError::Task(e.to_string()))?
    .map_err(|e| {
        error!("PDF export failed: {e}");
        e
    })?;

    info!("Exported '{}' ({} bytes)", filename, bytes.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/packages/share
pub async fn handle_share(
    Json(request): Json<ShareRequest>,
) -> Result<Json<ShareBundle>, AppError> {
    request
        .package
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    Ok(Json(ShareBundle::build(&request.package)))
}
