//! Voice submission endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    AllSubmissionsQuery, MessageResponse, Submission, SubmissionQuery, SubmissionSummary,
    SubmitAudioRequest,
};
use crate::routes::auth::AuthenticatedUser;
use crate::services::practice;
use crate::AppState;

/// POST /api/voice/submit
/// Scores the transcript and updates the caller's progress
pub async fn submit(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    payload: std::result::Result<Json<SubmitAudioRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Submission>)> {
    let Json(payload) = payload?;
    let (submission, _progress) = practice::submit(&state.db, auth.user_id, &payload).await?;
    Ok((StatusCode::CREATED, Json(submission)))
}

/// GET /api/voice/submissions
/// The caller's own submissions, newest first
pub async fn my_submissions(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<SubmissionQuery>,
) -> Result<Json<Vec<SubmissionSummary>>> {
    let submissions = state
        .db
        .list_submissions(Some(auth.user_id), query.lesson_id)
        .await?;

    Ok(Json(submissions.iter().map(|s| s.to_summary(false)).collect()))
}

/// GET /api/voice/all (admin)
pub async fn all_submissions(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Query(query): Query<AllSubmissionsQuery>,
) -> Result<Json<Vec<SubmissionSummary>>> {
    auth.require_admin()?;

    let submissions = state
        .db
        .list_submissions(query.user_id, query.lesson_id)
        .await?;

    Ok(Json(submissions.iter().map(|s| s.to_summary(true)).collect()))
}

/// DELETE /api/voice/submissions/:id
/// Owners may delete their own submissions; admins may delete any
pub async fn delete_submission(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    let submission = state
        .db
        .get_submission(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Submission not found".to_string()))?;

    if submission.user_id != auth.user_id && !auth.is_admin() {
        return Err(ApiError::Forbidden(
            "Not allowed to delete this submission".to_string(),
        ));
    }

    state.db.delete_submission(id).await?;
    tracing::info!("Deleted submission {}", id);

    Ok(Json(MessageResponse::new("Submission removed")))
}
