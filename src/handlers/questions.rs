// src/handlers/questions.rs

use axum::{
    Extension,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    api::{AppJson, AppPath, data},
    error::AppError,
    models::question::{Question, QuestionRequest},
    repositories::QuestionRepository,
    utils::jwt::Claims,
};

/// Lists the question bank. The correct answer is only included for admins.
pub async fn list_questions(
    State(questions): State<QuestionRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let list: Vec<Question> = questions
        .find_all()
        .await?
        .into_iter()
        .map(|q| q.for_role(claims.role))
        .collect();

    Ok(data(list))
}

/// Fetches one question. The correct answer is only included for admins.
pub async fn get_question(
    State(questions): State<QuestionRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let question = questions
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(data(question.for_role(claims.role)))
}

/// Adds a question to the bank.
/// Admin and teacher only.
pub async fn create_question(
    State(questions): State<QuestionRepository>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_question()?;
    let question = questions.create(new).await?;

    tracing::info!(question_id = question.id, author = %claims.sub, "Question created");

    Ok((StatusCode::CREATED, data(question.for_role(claims.role))))
}

/// Replaces a question.
/// Admin and teacher only.
pub async fn update_question(
    State(questions): State<QuestionRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<QuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    let new = payload.into_new_question()?;
    let question = questions
        .update(id, new)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    Ok(data(question.for_role(claims.role)))
}

/// Deletes a question together with the answers submitted for it.
/// Admin and teacher only.
pub async fn delete_question(
    State(questions): State<QuestionRepository>,
    AppPath(id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    if !questions.delete(id).await? {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    Ok(StatusCode::NO_CONTENT)
}
