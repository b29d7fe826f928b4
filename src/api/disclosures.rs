use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::disclosure::ConsentState;
use crate::error::AppError;
use crate::models::disclosure::{ConsentGrant, DisclosureRequest};

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub document_id: String,
}

#[derive(Debug, Deserialize)]
pub struct DurationRequest {
    pub days: u32,
}

/// Response of a denial.
#[derive(Debug, Serialize)]
pub struct DenyResponse {
    pub message: String,
    pub request_id: String,
    pub department: String,
}

/// `GET /api/v1/disclosures`
pub async fn list_pending_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<DisclosureRequest>>, AppError> {
    Ok(Json(state.disclosures.pending()?))
}

/// `GET /api/v1/disclosures/session`
pub async fn session_handler(
    State(state): State<AppState>,
) -> Result<Json<ConsentState>, AppError> {
    Ok(Json(state.disclosures.state()?))
}

/// `POST /api/v1/disclosures/{id}/review`
pub async fn review_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConsentState>, AppError> {
    Ok(Json(state.disclosures.review(&id)?))
}

/// `POST /api/v1/disclosures/session/toggle`
pub async fn toggle_handler(
    State(state): State<AppState>,
    Json(request): Json<ToggleRequest>,
) -> Result<Json<ConsentState>, AppError> {
    Ok(Json(state.disclosures.toggle(&request.document_id)?))
}

/// `PUT /api/v1/disclosures/session/duration`
pub async fn duration_handler(
    State(state): State<AppState>,
    Json(request): Json<DurationRequest>,
) -> Result<Json<ConsentState>, AppError> {
    Ok(Json(state.disclosures.set_duration(request.days)?))
}

/// `POST /api/v1/disclosures/session/back`
pub async fn back_handler(State(state): State<AppState>) -> Result<Json<ConsentState>, AppError> {
    Ok(Json(state.disclosures.back()?))
}

/// `POST /api/v1/disclosures/session/deny`
pub async fn deny_handler(State(state): State<AppState>) -> Result<Json<DenyResponse>, AppError> {
    let denied = state.disclosures.deny()?;
    Ok(Json(DenyResponse {
        message: "Request denied".to_string(),
        request_id: denied.id,
        department: denied.department,
    }))
}

/// `POST /api/v1/disclosures/session/grant`
///
/// Answers 422 when no document is selected; the review stays open.
pub async fn grant_handler(State(state): State<AppState>) -> Result<Json<ConsentGrant>, AppError> {
    Ok(Json(state.disclosures.grant()?))
}

/// `POST /api/v1/disclosures/session/acknowledge`
pub async fn acknowledge_handler(
    State(state): State<AppState>,
) -> Result<Json<ConsentGrant>, AppError> {
    Ok(Json(state.disclosures.acknowledge()?))
}
