// src/repositories/question_repository.rs

use sqlx::PgPool;

use crate::{
    error::AppError,
    models::question::{NewQuestion, Question, QuestionRow},
};

#[derive(Clone)]
pub struct QuestionRepository {
    pool: PgPool,
}

impl QuestionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Question>, AppError> {
        let rows = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, type, question, options, answer, image_url, score, created_at, updated_at
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Question::try_from).collect()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            SELECT id, type, question, options, answer, image_url, score, created_at, updated_at
            FROM questions
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Question::try_from).transpose()
    }

    pub async fn create(&self, new: NewQuestion) -> Result<Question, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            INSERT INTO questions (type, question, options, answer, image_url, score)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, type, question, options, answer, image_url, score, created_at, updated_at
            "#,
        )
        .bind(new.question_type)
        .bind(new.question)
        .bind(new.options)
        .bind(new.answer)
        .bind(new.image_url)
        .bind(new.score)
        .fetch_one(&self.pool)
        .await?;

        Question::try_from(row)
    }

    /// Replaces every editable column. `None` when the id does not exist.
    pub async fn update(&self, id: i64, new: NewQuestion) -> Result<Option<Question>, AppError> {
        let row = sqlx::query_as::<_, QuestionRow>(
            r#"
            UPDATE questions
            SET type = $2, question = $3, options = $4, answer = $5, image_url = $6, score = $7,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, type, question, options, answer, image_url, score, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(new.question_type)
        .bind(new.question)
        .bind(new.options)
        .bind(new.answer)
        .bind(new.image_url)
        .bind(new.score)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Question::try_from).transpose()
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
