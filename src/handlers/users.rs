// src/handlers/users.rs

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    api::{AppJson, AppPath, data},
    error::AppError,
    models::{
        student::DEFAULT_CLASS,
        user::{AdminCreateUserRequest, NewUser},
    },
    repositories::{UserRepository, user_repository::ProfileSeed},
    utils::{hash::hash_password, jwt::Claims},
};

/// Lists all users in the system.
/// Admin only.
pub async fn list_users(State(users): State<UserRepository>) -> Result<impl IntoResponse, AppError> {
    Ok(data(users.find_all().await?))
}

/// Creates a user with an explicit role. Student accounts also get a default profile.
/// Admin only.
pub async fn create_user(
    State(users): State<UserRepository>,
    AppJson(payload): AppJson<AdminCreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if users.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Username '{}' already exists",
            payload.username
        )));
    }

    let hashed_password = hash_password(&payload.password)?;

    let user = users
        .create(
            NewUser {
                username: &payload.username,
                password_hash: &hashed_password,
                email: &payload.email,
                role: payload.role,
            },
            Some(ProfileSeed {
                name: &payload.username,
                class: DEFAULT_CLASS,
            }),
        )
        .await?;

    tracing::info!(user_id = user.id, role = %user.role, "Admin created user {}", user.username);

    Ok((StatusCode::CREATED, data(user)))
}

/// Deletes a user by ID, cascading to their profile and answers.
/// Admin only. Prevents deleting self.
pub async fn delete_user(
    State(users): State<UserRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if id == claims.user_id()? {
        return Err(AppError::BadRequest("Cannot delete yourself".to_string()));
    }

    if !users.delete(id).await? {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
