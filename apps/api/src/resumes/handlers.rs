//! Axum route handlers for the Resumes API.
//!
//! Every handler takes `AuthUser` first, so unauthenticated requests are
//! rejected before any store access. Bodies are taken as raw bytes and
//! parsed inside the handler: a missing body means no fields, and an
//! update decides Not-Found / Not-Authorized before looking at the body.

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::resume::{NewResume, Resume, ResumeFields, ResumePatch};
use crate::resumes::access::{ensure_owner, parse_resume_id, RESUME_NOT_FOUND};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

/// GET /api/resumes
///
/// Returns the caller's resumes, newest first.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<Resume>>, AppError> {
    let resumes = state.resumes.find_by_owner(&user.user_id).await?;
    Ok(Json(resumes))
}

/// POST /api/resumes
pub async fn handle_create_resume(
    State(state): State<AppState>,
    user: AuthUser,
    body: Bytes,
) -> Result<Json<Resume>, AppError> {
    let fields = parse_fields(&body)?;
    let resume = state
        .resumes
        .insert(NewResume::new(&user.user_id, fields))
        .await?;

    info!("Created resume {} for user {}", resume.id, resume.owner);
    Ok(Json(resume))
}

/// PUT /api/resumes/:id
///
/// Partial update: only non-empty fields overwrite stored values.
pub async fn handle_update_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<Json<Resume>, AppError> {
    let id = parse_resume_id(&raw_id)?;
    let existing = ensure_owner(state.resumes.find_by_id(id).await?, &user.user_id)?;

    let patch = ResumePatch::from_fields(parse_fields(&body)?);
    if patch.is_empty() {
        return Ok(Json(existing));
    }

    // A concurrent delete between lookup and write surfaces as Not-Found.
    let updated = state
        .resumes
        .update(id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound(RESUME_NOT_FOUND.to_string()))?;

    info!("Updated resume {id} for user {}", user.user_id);
    Ok(Json(updated))
}

/// DELETE /api/resumes/:id
pub async fn handle_delete_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_resume_id(&raw_id)?;
    ensure_owner(state.resumes.find_by_id(id).await?, &user.user_id)?;

    // Removing an already-removed record still acknowledges: the end state is the same.
    state.resumes.delete(id).await?;

    info!("Deleted resume {id} for user {}", user.user_id);
    Ok(Json(MessageResponse {
        msg: "Resume removed",
    }))
}

/// GET /api/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(raw_id): Path<String>,
) -> Result<Json<Resume>, AppError> {
    let id = parse_resume_id(&raw_id)?;
    let resume = ensure_owner(state.resumes.find_by_id(id).await?, &user.user_id)?;
    Ok(Json(resume))
}

fn parse_fields(body: &[u8]) -> Result<ResumeFields, AppError> {
    ResumeFields::from_body(body).map_err(|e| AppError::BadRequest(format!("Invalid body: {e}")))
}
