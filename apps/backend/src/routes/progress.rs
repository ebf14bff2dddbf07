//! Progress endpoint

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::ProgressEntry;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/progress
/// The caller's progress per lesson, most recently attempted first
pub async fn list(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<Vec<ProgressEntry>>> {
    let entries = state.db.list_progress(auth.user_id).await?;
    Ok(Json(entries))
}
