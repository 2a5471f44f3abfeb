use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::document::{render_markdown, DocumentKind};
use crate::errors::AppError;
use crate::experience::period::YearMonth;
use crate::export::ExportTarget;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub kind: ExportTarget,
}

#[derive(Debug, Serialize)]
pub struct ExportResponse {
    pub files: Vec<String>,
}

/// GET /api/v1/export/resume
pub async fn download_resume(State(state): State<AppState>) -> Result<Response, AppError> {
    download(&state, DocumentKind::Resume).await
}

/// GET /api/v1/export/cover-letter
pub async fn download_cover_letter(State(state): State<AppState>) -> Result<Response, AppError> {
    download(&state, DocumentKind::CoverLetter).await
}

/// GET /api/v1/export/markdown
pub async fn download_markdown(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_markdown(&state.resume, YearMonth::current()),
    )
}

/// POST /api/v1/export
/// Writes the requested documents into the export directory.
pub async fn create_export(
    State(state): State<AppState>,
    Json(req): Json<ExportRequest>,
) -> Result<Json<ExportResponse>, AppError> {
    let files = state.exporter.export(req.kind).await?;
    Ok(Json(ExportResponse { files }))
}

async fn download(state: &AppState, kind: DocumentKind) -> Result<Response, AppError> {
    let artifact = state.exporter.render(kind).await?;
    let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        artifact.bytes,
    )
        .into_response())
}
