//! User registration and profile endpoints

use axum::{extract::State, http::StatusCode, Extension, Json};

use crate::error::{ApiError, Result};
use crate::models::{RegisterUserRequest, RegisterUserResponse, Role, UpdateProfileRequest, User};
use crate::routes::auth::AuthenticatedUser;
use crate::services::accounts::{validate_email, validate_name};
use crate::services::tokens::{generate_token, hash_token};
use crate::AppState;

/// POST /api/users/register
/// Creates a student account and returns its bearer token
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<RegisterUserResponse>)> {
    let name = validate_name(&payload.name)?;
    let email = validate_email(&payload.email)?;
    let language = payload.preferred_language.unwrap_or_default();

    let token = generate_token();
    let user = state
        .db
        .create_user(&name, &email, language, Role::Student, &hash_token(&token))
        .await?;

    tracing::info!("Registered new user: {}", user.id);

    Ok((
        StatusCode::CREATED,
        Json(RegisterUserResponse {
            user: user.to_api_user(),
            token,
        }),
    ))
}

/// GET /api/users/profile
pub async fn profile(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
) -> Result<Json<User>> {
    let user = state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(user.to_api_user()))
}

/// PUT /api/users/profile
/// Updates only the fields present in the body
pub async fn update_profile(
    Extension(auth): Extension<AuthenticatedUser>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<User>> {
    let mut user = state
        .db
        .get_user(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if let Some(name) = payload.name {
        user.name = validate_name(&name)?;
    }
    if let Some(email) = payload.email {
        user.email = validate_email(&email)?;
    }
    if let Some(language) = payload.preferred_language {
        user.preferred_language = language.as_str().to_string();
    }

    let updated = state.db.update_user_profile(&user).await?;
    Ok(Json(updated.to_api_user()))
}
