// src/repositories/answer_repository.rs

use sqlx::{FromRow, PgPool};

use crate::{
    error::AppError,
    models::answer::{StudentAnswer, StudentAnswerWithDetails},
};

/// Result of [`AnswerRepository::upsert`].
#[derive(Debug, FromRow)]
pub struct UpsertedAnswer {
    #[sqlx(flatten)]
    pub answer: StudentAnswer,
    /// `true` when a new row was inserted, `false` when an existing one was overwritten.
    pub inserted: bool,
}

#[derive(Clone)]
pub struct AnswerRepository {
    pool: PgPool,
}

impl AnswerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<StudentAnswer>, AppError> {
        let answer = sqlx::query_as::<_, StudentAnswer>(
            r#"
            SELECT id, student_id, question_id, answer, score, created_at, updated_at
            FROM student_answers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    pub async fn find_by_student(&self, student_id: i64) -> Result<Vec<StudentAnswer>, AppError> {
        let answers = sqlx::query_as::<_, StudentAnswer>(
            r#"
            SELECT id, student_id, question_id, answer, score, created_at, updated_at
            FROM student_answers
            WHERE student_id = $1
            ORDER BY question_id
            "#,
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    pub async fn find_by_student_and_question(
        &self,
        student_id: i64,
        question_id: i64,
    ) -> Result<Option<StudentAnswer>, AppError> {
        let answer = sqlx::query_as::<_, StudentAnswer>(
            r#"
            SELECT id, student_id, question_id, answer, score, created_at, updated_at
            FROM student_answers
            WHERE student_id = $1 AND question_id = $2
            "#,
        )
        .bind(student_id)
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }

    /// All answers with student and question details, newest first.
    pub async fn find_all_with_details(&self) -> Result<Vec<StudentAnswerWithDetails>, AppError> {
        let answers = sqlx::query_as::<_, StudentAnswerWithDetails>(
            r#"
            SELECT
                sa.id, sa.student_id, sa.question_id, sa.answer, sa.score,
                s.name AS student_name, s.class AS student_class, s.user_id,
                q.question AS question_text, q.type AS question_type, q.score AS question_score,
                sa.created_at, sa.updated_at
            FROM student_answers sa
            JOIN students s ON sa.student_id = s.id
            JOIN questions q ON sa.question_id = q.id
            ORDER BY sa.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(answers)
    }

    /// Inserts the answer or overwrites the existing (student, question) row in one statement.
    ///
    /// The unique constraint on (student_id, question_id) makes concurrent
    /// submissions converge on a single row; the last writer's answer and score win.
    pub async fn upsert(
        &self,
        student_id: i64,
        question_id: i64,
        answer: &str,
        score: Option<i32>,
    ) -> Result<UpsertedAnswer, AppError> {
        let upserted = sqlx::query_as::<_, UpsertedAnswer>(
            r#"
            INSERT INTO student_answers (student_id, question_id, answer, score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (student_id, question_id) DO UPDATE SET
                answer = EXCLUDED.answer,
                score = EXCLUDED.score,
                updated_at = NOW()
            RETURNING id, student_id, question_id, answer, score, created_at, updated_at,
                (xmax = 0) AS inserted
            "#,
        )
        .bind(student_id)
        .bind(question_id)
        .bind(answer)
        .bind(score)
        .fetch_one(&self.pool)
        .await?;

        Ok(upserted)
    }

    /// Sets a manual grade. `None` when the answer does not exist.
    pub async fn set_score(&self, id: i64, score: i32) -> Result<Option<StudentAnswer>, AppError> {
        let answer = sqlx::query_as::<_, StudentAnswer>(
            r#"
            UPDATE student_answers
            SET score = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, student_id, question_id, answer, score, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(score)
        .fetch_optional(&self.pool)
        .await?;

        Ok(answer)
    }
}
