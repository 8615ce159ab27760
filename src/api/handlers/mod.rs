use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::error::StreamlineError;
use crate::models::Translation;

use super::ApiState;

// ============================================================
// Error Handling
// ============================================================

/// Map a service error onto an HTTP response.
///
/// Lifecycle violations are client-visible conflicts and carry the error
/// message. `DuplicateId` is an internal invariant violation: it is logged
/// server-side and clients only see a generic message.
fn error_response(e: StreamlineError) -> (StatusCode, String) {
    match e {
        StreamlineError::NotFound(_) => {
            tracing::warn!("Lookup failed: {}", e);
            (StatusCode::NOT_FOUND, e.to_string())
        }
        StreamlineError::DuplicateId(_) => {
            tracing::error!("Internal error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            )
        }
        StreamlineError::AlreadyFinished(_)
        | StreamlineError::NotYetActivated(_)
        | StreamlineError::AlreadyInterrupted(_) => {
            tracing::warn!("Invalid transition: {}", e);
            (StatusCode::CONFLICT, e.to_string())
        }
    }
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Translations
// ============================================================

pub async fn create_translation(
    State(state): State<ApiState>,
) -> Result<(StatusCode, Json<Translation>), (StatusCode, String)> {
    state
        .service
        .create()
        .map(|t| (StatusCode::CREATED, Json(t)))
        .map_err(error_response)
}

pub async fn list_translations(State(state): State<ApiState>) -> Json<Vec<Translation>> {
    Json(state.service.list())
}

pub async fn get_translation(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Translation>, (StatusCode, String)> {
    state.service.get(id).map(Json).map_err(error_response)
}

pub async fn delete_translation(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    state
        .service
        .delete(id)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(error_response)
}

pub async fn activate_translation(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Translation>, (StatusCode, String)> {
    state.service.activate(id).map(Json).map_err(error_response)
}

pub async fn interrupt_translation(
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Translation>, (StatusCode, String)> {
    state
        .service
        .interrupt(id, state.interrupt_timeout)
        .map(Json)
        .map_err(error_response)
}
