//! Lesson catalogue endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{
    CreateLessonRequest, Lesson, LessonListQuery, LessonListResponse, MessageResponse, NewLesson,
    UpdateLessonRequest,
};
use crate::routes::auth::AuthenticatedUser;
use crate::services::accounts::require_field;
use crate::AppState;

/// GET /api/lessons
/// Paginated list, optionally filtered by language
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<LessonListQuery>,
) -> Result<Json<LessonListResponse>> {
    let language = query.language_code.as_deref().filter(|l| !l.is_empty());

    let total = state.db.count_lessons(language).await?;
    let lessons = state
        .db
        .list_lessons(language, query.limit(), query.offset())
        .await?;

    Ok(Json(LessonListResponse {
        page: query.page(),
        limit: query.limit(),
        total,
        lessons: lessons.iter().map(|l| l.to_api_lesson()).collect(),
    }))
}

/// GET /api/lessons/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<Json<Lesson>> {
    let lesson = state
        .db
        .get_lesson(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    Ok(Json(lesson.to_api_lesson()))
}

/// POST /api/lessons (admin)
pub async fn create(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<Lesson>)> {
    auth.require_admin()?;

    let new_lesson = NewLesson {
        title: require_field(payload.title, "title")?,
        language_code: require_field(payload.language_code, "language_code")?,
        content: payload.content.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        expected_text: payload.expected_text.unwrap_or_default(),
        audio_example_url: payload.audio_example_url.unwrap_or_default(),
        order: payload.order.unwrap_or(0),
    };

    let lesson = state.db.create_lesson(&new_lesson).await?;
    tracing::info!("Created lesson {} ({})", lesson.id, lesson.title);

    Ok((StatusCode::CREATED, Json(lesson.to_api_lesson())))
}

/// PUT /api/lessons/:id (admin)
pub async fn update(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateLessonRequest>,
) -> Result<Json<Lesson>> {
    auth.require_admin()?;

    let mut lesson = state
        .db
        .get_lesson(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Lesson not found".to_string()))?;

    if payload.title.is_some() {
        lesson.title = require_field(payload.title, "title")?;
    }
    if payload.language_code.is_some() {
        lesson.language_code = require_field(payload.language_code, "language_code")?;
    }
    if let Some(content) = payload.content {
        lesson.content = content;
    }
    if let Some(description) = payload.description {
        lesson.description = description;
    }
    if let Some(expected_text) = payload.expected_text {
        lesson.expected_text = expected_text;
    }
    if let Some(url) = payload.audio_example_url {
        lesson.audio_example_url = url;
    }
    if let Some(order) = payload.order {
        lesson.sort_order = order;
    }

    let updated = state.db.update_lesson(&lesson).await?;
    Ok(Json(updated.to_api_lesson()))
}

/// DELETE /api/lessons/:id (admin)
pub async fn delete(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    auth.require_admin()?;

    if !state.db.delete_lesson(id).await? {
        return Err(ApiError::NotFound("Lesson not found".to_string()));
    }

    tracing::info!("Deleted lesson {}", id);
    Ok(Json(MessageResponse::new("Lesson removed")))
}

/// DELETE /api/lessons/:id/audio (admin)
/// Clears the example audio reference
pub async fn delete_audio(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>> {
    auth.require_admin()?;

    if !state.db.clear_lesson_audio(id).await? {
        return Err(ApiError::NotFound("Lesson not found".to_string()));
    }

    Ok(Json(MessageResponse::new("Lesson audio removed")))
}
