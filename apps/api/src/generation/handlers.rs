//! Axum route handlers for the cover-letter API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::generation::error::ErrorKind;
use crate::generation::pipeline::GenerationResult;
use crate::session::{resume_from_upload, SessionStatus};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeRequest {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub message: String,
    pub length: usize,
}

#[derive(Debug, Deserialize)]
pub struct SaveLocationRequest {
    pub directory_path: String,
}

#[derive(Debug, Serialize)]
pub struct SaveLocationResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub save_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub content: String,
}

impl IntoResponse for GenerationResult {
    fn into_response(self) -> Response {
        let status = match self.error_code {
            None => StatusCode::OK,
            Some(ErrorKind::InvalidInput)
            | Some(ErrorKind::NoResumeSet)
            | Some(ErrorKind::SaveLocationInvalid) => StatusCode::BAD_REQUEST,
            Some(ErrorKind::LlmUnavailable) | Some(ErrorKind::LlmMalformedResponse) => {
                StatusCode::BAD_GATEWAY
            }
            Some(ErrorKind::IoError) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /resume
///
/// Replaces the current resume with the submitted text.
pub async fn handle_set_resume(
    State(state): State<AppState>,
    Json(request): Json<ResumeRequest>,
) -> Result<Json<ResumeResponse>, AppError> {
    let length = state.pipeline.set_resume(request.content)?;
    Ok(Json(ResumeResponse {
        message: "Resume saved successfully".to_string(),
        length,
    }))
}

/// POST /resume-file
///
/// Replaces the current resume with an uploaded `.txt` / `.md` file (multipart field `file`).
pub async fn handle_set_resume_file(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Validation("Uploaded file has no filename".to_string()))?;
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;

        let content = resume_from_upload(&filename, data)?;
        let length = state.pipeline.set_resume(content)?;
        return Ok(Json(ResumeResponse {
            message: format!("Resume file '{filename}' processed successfully"),
            length,
        }));
    }

    Err(AppError::Validation(
        "Multipart field 'file' is required".to_string(),
    ))
}

/// POST /save-location
///
/// Validates and sets the directory generated PDFs are written to.
pub async fn handle_set_save_location(
    State(state): State<AppState>,
    Json(request): Json<SaveLocationRequest>,
) -> (StatusCode, Json<SaveLocationResponse>) {
    match state.pipeline.set_save_location(&request.directory_path) {
        Ok(resolved) => (
            StatusCode::OK,
            Json(SaveLocationResponse {
                ok: true,
                save_location: Some(resolved.display().to_string()),
                error: None,
            }),
        ),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(SaveLocationResponse {
                ok: false,
                save_location: None,
                error: Some(e.to_string()),
            }),
        ),
    }
}

/// POST /generate-cover-letter
///
/// Full pipeline: metadata → letter → filename → PDF. Always answers with a `GenerationResult`.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> GenerationResult {
    state.pipeline.generate(&request.content).await
}

/// GET /status
pub async fn handle_status(State(state): State<AppState>) -> Json<SessionStatus> {
    Json(state.pipeline.status())
}
