// src/handlers/answers.rs

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
        answer::{GradeRequest, SubmitAnswerRequest},
        student::Student,
    },
    repositories::{AnswerRepository, QuestionRepository, StudentRepository},
    scoring::score_answer,
    utils::jwt::Claims,
};

/// Resolves the caller's student profile or fails with 404.
async fn caller_profile(students: &StudentRepository, claims: &Claims) -> Result<Student, AppError> {
    students
        .find_by_user_id(claims.user_id()?)
        .await?
        .ok_or(AppError::NotFound("Student profile not found".to_string()))
}

/// Lists the caller's own answers.
pub async fn my_answers(
    State(students): State<StudentRepository>,
    State(answers): State<AnswerRepository>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let student = caller_profile(&students, &claims).await?;

    Ok(data(answers.find_by_student(student.id).await?))
}

/// The caller's answer to a single question.
pub async fn my_answer_for_question(
    State(students): State<StudentRepository>,
    State(questions): State<QuestionRepository>,
    State(answers): State<AnswerRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(question_id): AppPath<i64>,
) -> Result<impl IntoResponse, AppError> {
    let student = caller_profile(&students, &claims).await?;

    if questions.find_by_id(question_id).await?.is_none() {
        return Err(AppError::NotFound("Question not found".to_string()));
    }

    let answer = answers
        .find_by_student_and_question(student.id, question_id)
        .await?
        .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    Ok(data(answer))
}

/// Submits (or resubmits) an answer.
///
/// * Resolves the caller's profile and the target question (404 if either is missing).
/// * Scores multiple-choice answers immediately; essays stay ungraded.
/// * Upserts the (student, question) row so a resubmission is rescored in place.
///
/// Returns 201 for a first submission and 200 when an earlier answer was replaced.
pub async fn submit_answer(
    State(students): State<StudentRepository>,
    State(questions): State<QuestionRepository>,
    State(answers): State<AnswerRepository>,
    Extension(claims): Extension<Claims>,
    AppJson(payload): AppJson<SubmitAnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let student = caller_profile(&students, &claims).await?;

    let question = questions
        .find_by_id(payload.question_id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    let score = score_answer(&question, &payload.answer);

    let upserted = answers
        .upsert(student.id, question.id, &payload.answer, score)
        .await?;

    tracing::debug!(
        student_id = student.id,
        question_id = question.id,
        ?score,
        inserted = upserted.inserted,
        "Answer stored"
    );

    let status = if upserted.inserted {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, data(upserted.answer)))
}

/// Lists every submitted answer with student and question details.
/// Admin and teacher only.
pub async fn list_all_answers(
    State(answers): State<AnswerRepository>,
) -> Result<impl IntoResponse, AppError> {
    Ok(data(answers.find_all_with_details().await?))
}

/// Sets a manual grade, bounded by the question's full score.
/// Admin and teacher only.
pub async fn grade_answer(
    State(questions): State<QuestionRepository>,
    State(answers): State<AnswerRepository>,
    Extension(claims): Extension<Claims>,
    AppPath(id): AppPath<i64>,
    AppJson(payload): AppJson<GradeRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let answer = answers
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    let question = questions
        .find_by_id(answer.question_id)
        .await?
        .ok_or(AppError::NotFound("Question not found".to_string()))?;

    if payload.score > question.score {
        return Err(AppError::BadRequest(format!(
            "Score must be between 0 and {}",
            question.score
        )));
    }

    let graded = answers
        .set_score(id, payload.score)
        .await?
        .ok_or(AppError::NotFound("Answer not found".to_string()))?;

    tracing::info!(answer_id = id, score = payload.score, grader = %claims.sub, "Answer graded");

    Ok(data(graded))
}
