// src/handlers/students.rs

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
        student::{CreateStudentRequest, DEFAULT_CLASS, UpdateStudentRequest},
        user::Role,
    },
    repositories::{StudentRepository, UserRepository},
    utils::{jwt::Claims, policy::authorize_student_read},
};

/// Lists every student profile.
/// Admin and teacher only.
pub async fn list_students(
    State(students): State<StudentRepository>,
) -> Result<impl IntoResponse, AppError> {
    Ok(data(students.find_all().await?))
}

/// Fetches one profile. Students may only fetch their own.
pub async fn get_student(
    State(students): State<StudentRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = students
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    authorize_student_read(claims.role, claims.user_id()?, student.user_id)?;

    Ok(data(student))
}

/// Returns the caller's own profile.
///
/// A student without a profile gets a default one (username as name,
/// unassigned class) on first access. Other roles have no profile.
pub async fn my_profile(
    State(students): State<StudentRepository>,
    State(users): State<UserRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    if let Some(student) = students.find_by_user_id(user_id).await? {
        return Ok(data(student));
    }

    if claims.role != Role::Student {
        return Err(AppError::NotFound("Student profile not found".to_string()));
    }

    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::NotFound("User not found".to_string()))?;

    let student = students
        .find_or_create(user.id, &user.username, DEFAULT_CLASS)
        .await?;

    tracing::info!(user_id, student_id = student.id, "Created default student profile");

    Ok(data(student))
}

/// Creates a profile for an existing user.
/// Admin and teacher only.
pub async fn create_student(
    State(students): State<StudentRepository>,
    State(users): State<UserRepository>,
    AppJson(payload): AppJson<CreateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    if users.find_by_id(payload.user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    let student = students
        .create(payload.user_id, &payload.name, &payload.class)
        .await?;

    Ok((StatusCode::CREATED, data(student)))
}

/// Updates name and/or class.
/// Admin and teacher only.
pub async fn update_student(
    State(students): State<StudentRepository>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateStudentRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let student = students
        .update(id, payload.name.as_deref(), payload.class.as_deref())
        .await?
        .ok_or(AppError::NotFound("Student not found".to_string()))?;

    Ok(data(student))
}

/// Deletes a profile and, by cascade, its answers.
/// Admin and teacher only.
pub async fn delete_student(
    State(students): State<StudentRepository>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !students.delete(id).await? {
        return Err(AppError::NotFound("Student not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
