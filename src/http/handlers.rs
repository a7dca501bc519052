use super::state::AppState;
use crate::compression::CompressionMethod;
use crate::error::CompressError;
use crate::media::{MediaKind, MediaSelection};
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{error, info};

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SelectMediaRequest {
    pub path: PathBuf,

    /// Expected media kind; inferred from the extension when absent
    pub kind: Option<MediaKind>,
}

#[derive(Debug, Deserialize)]
pub struct ChooseMethodRequest {
    pub method: CompressionMethod,
}

#[derive(Debug, Deserialize)]
pub struct AddRecordingRequest {
    pub path: PathBuf,
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MenuEntry {
    pub method: CompressionMethod,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for CompressError {
    fn into_response(self) -> Response {
        let status = match &self {
            CompressError::RecordingNotFound(_) => StatusCode::NOT_FOUND,
            CompressError::AlreadyCompressing => StatusCode::CONFLICT,
            CompressError::NoSelection
            | CompressError::NoMethod
            | CompressError::MethodNotOffered { .. }
            | CompressError::Pick(_)
            | CompressError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CompressError::Tool(_) => StatusCode::BAD_GATEWAY,
            CompressError::Library(_) | CompressError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("{}", self);
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<JsonRejection> for CompressError {
    fn from(rejection: JsonRejection) -> Self {
        CompressError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for CompressError {
    fn from(rejection: PathRejection) -> Self {
        CompressError::InvalidRequest(rejection.body_text())
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /media/select
/// Pick a file to compress, replacing any previous selection
pub async fn select_media(
    State(state): State<AppState>,
    payload: Result<Json<SelectMediaRequest>, JsonRejection>,
) -> Result<Json<MediaSelection>, CompressError> {
    let Json(req) = payload?;
    let selection = state.session.pick(&req.path, req.kind).await?;
    Ok(Json(selection))
}

/// GET /media/menu
/// Compression methods offered for the current selection
pub async fn get_menu(State(state): State<AppState>) -> Json<Vec<MenuEntry>> {
    let entries = state
        .session
        .menu()
        .await
        .into_iter()
        .map(|method| MenuEntry {
            method,
            label: method.label(),
        })
        .collect();

    Json(entries)
}

/// POST /media/method
pub async fn choose_method(
    State(state): State<AppState>,
    payload: Result<Json<ChooseMethodRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, CompressError> {
    let Json(req) = payload?;
    state.session.choose_method(req.method).await?;

    Ok(Json(MessageResponse {
        status: "ok".to_string(),
        message: format!("Compression method set to {}", req.method.label()),
    }))
}

/// POST /media/compress
/// Run the chosen method on the selected media
pub async fn compress_now(State(state): State<AppState>) -> Response {
    match state.session.compress_now().await {
        Ok(outcome) => {
            info!("Compression finished");
            (StatusCode::OK, Json(outcome)).into_response()
        }
        Err(e) => e.into_response(),
    }
}

/// POST /media/reset
pub async fn reset(State(state): State<AppState>) -> Json<MessageResponse> {
    state.session.reset().await;

    Json(MessageResponse {
        status: "ok".to_string(),
        message: "Session reset".to_string(),
    })
}

/// GET /recordings
pub async fn list_recordings(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.session.recordings().await)
}

/// POST /recordings
/// Import an audio file into the recording list
pub async fn add_recording(
    State(state): State<AppState>,
    payload: Result<Json<AddRecordingRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return CompressError::from(rejection).into_response(),
    };

    match state.session.add_recording(&req.path, req.name).await {
        Ok(recording) => (StatusCode::CREATED, Json(recording)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// DELETE /recordings/:index
pub async fn delete_recording(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Response {
    let index = match index {
        Ok(Path(index)) => index,
        Err(rejection) => return CompressError::from(rejection).into_response(),
    };

    match state.session.delete_recording(index).await {
        Ok(recording) => (StatusCode::OK, Json(recording)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// POST /recordings/:index/save
/// Persist a recording into the library
pub async fn save_recording(
    State(state): State<AppState>,
    index: Result<Path<usize>, PathRejection>,
) -> Response {
    let index = match index {
        Ok(Path(index)) => index,
        Err(rejection) => return CompressError::from(rejection).into_response(),
    };

    match state.session.save_recording(index).await {
        Ok(asset) => (StatusCode::OK, Json(asset)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /status
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session.status().await))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
