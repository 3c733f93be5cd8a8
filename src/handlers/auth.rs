// src/handlers/auth.rs

use axum::{Extension, extract::State, http::StatusCode, response::IntoResponse};
use validator::Validate;

use crate::{
    api::{AppJson, data},
    config::Config,
    error::AppError,
    models::{
        student::DEFAULT_CLASS,
        user::{AuthResponse, LoginRequest, NewUser, RegisterRequest, Role},
    },
    repositories::{UserRepository, user_repository::ProfileSeed},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new student account.
///
/// Hashes the password with Argon2 and creates the user together with its
/// student profile. Returns 201 Created with a session token.
pub async fn register(
    State(users): State<UserRepository>,
    State(config): State<Config>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if payload.role.unwrap_or_default() != Role::Student {
        return Err(AppError::BadRequest(
            "Only student accounts can be self-registered".to_string(),
        ));
    }

    if users.find_by_username(&payload.username).await?.is_some() {
        return Err(AppError::BadRequest(format!(
            "Username '{}' already exists",
            payload.username
        )));
    }

    let hashed_password = hash_password(&payload.password)?;

    let profile = ProfileSeed {
        name: payload.name.as_deref().unwrap_or(&payload.username),
        class: payload.class.as_deref().unwrap_or(DEFAULT_CLASS),
    };

    let user = users
        .create(
            NewUser {
                username: &payload.username,
                password_hash: &hashed_password,
                email: &payload.email,
                role: Role::Student,
            },
            Some(profile),
        )
        .await?;

    tracing::info!(user_id = user.id, "Registered student {}", user.username);

    let token = sign_jwt(user.id, user.role, &config.jwt_secret, config.jwt_expiration)?;

    Ok((StatusCode::CREATED, data(AuthResponse { token, user })))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown usernames and wrong passwords get the same 401 message.
pub async fn login(
    State(users): State<UserRepository>,
    State(config): State<Config>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let invalid = || AppError::AuthError("Invalid username or password".to_string());

    let user = users
        .find_by_username(&payload.username)
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&payload.password, &user.password)? {
        tracing::warn!(user_id = user.id, "Failed login attempt");
        return Err(invalid());
    }

    let token = sign_jwt(user.id, user.role, &config.jwt_secret, config.jwt_expiration)?;

    Ok(data(AuthResponse { token, user }))
}

/// Returns the account behind the presented token.
pub async fn me(
    State(users): State<UserRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = users
        .find_by_id(claims.user_id()?)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    Ok(data(user))
}
