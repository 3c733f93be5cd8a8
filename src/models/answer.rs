// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::models::question::QuestionType;

/// Represents the 'student_answers' table.
/// One row per (student, question); resubmission overwrites it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentAnswer {
    pub id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub answer: String,

    /// `None` until graded (essay answers before a teacher scores them).
    pub score: Option<i32>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Answer joined with its student and question, for the staff overview.
#[derive(Debug, Serialize, FromRow)]
pub struct StudentAnswerWithDetails {
    pub id: i64,
    pub student_id: i64,
    pub question_id: i64,
    pub answer: String,
    pub score: Option<i32>,
    pub student_name: String,
    pub student_class: String,
    pub user_id: i64,
    pub question_text: String,
    pub question_type: QuestionType,
    pub question_score: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for submitting an answer.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitAnswerRequest {
    #[validate(range(min = 1))]
    pub question_id: i64,
    #[validate(length(min = 1, max = 10000))]
    pub answer: String,
}

/// DTO for grading an answer manually.
#[derive(Debug, Deserialize, Validate)]
pub struct GradeRequest {
    #[validate(range(min = 0))]
    pub score: i32,
}
