// src/repositories/student_repository.rs

use sqlx::PgPool;

use crate::{
    error::{AppError, is_unique_violation},
    models::student::Student,
};

#[derive(Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let students = sqlx::query_as::<_, Student>(
            r#"
            SELECT s.id, s.user_id, s.name, s.class, u.email, s.created_at, s.updated_at
            FROM students s
            JOIN users u ON s.user_id = u.id
            ORDER BY s.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT s.id, s.user_id, s.name, s.class, u.email, s.created_at, s.updated_at
            FROM students s
            JOIN users u ON s.user_id = u.id
            WHERE s.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn find_by_user_id(&self, user_id: i64) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            SELECT s.id, s.user_id, s.name, s.class, u.email, s.created_at, s.updated_at
            FROM students s
            JOIN users u ON s.user_id = u.id
            WHERE s.user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    /// Creates a profile for `user_id`. A second profile for the same user is a `BadRequest`.
    pub async fn create(&self, user_id: i64, name: &str, class: &str) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(
            r#"
            WITH s AS (
                INSERT INTO students (user_id, name, class)
                VALUES ($1, $2, $3)
                RETURNING id, user_id, name, class, created_at, updated_at
            )
            SELECT s.id, s.user_id, s.name, s.class, u.email, s.created_at, s.updated_at
            FROM s
            JOIN users u ON s.user_id = u.id
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(class)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest(format!("User {} already has a student profile", user_id))
            } else {
                AppError::from(e)
            }
        })
    }

    /// Returns the user's profile, inserting a default one first if none exists.
    /// Concurrent first accesses converge on the same row.
    pub async fn find_or_create(
        &self,
        user_id: i64,
        name: &str,
        class: &str,
    ) -> Result<Student, AppError> {
        sqlx::query(
            r#"
            INSERT INTO students (user_id, name, class)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(class)
        .execute(&self.pool)
        .await?;

        self.find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Student profile not found".to_string()))
    }

    /// Partial update; `None` fields keep their stored value.
    pub async fn update(
        &self,
        id: i64,
        name: Option<&str>,
        class: Option<&str>,
    ) -> Result<Option<Student>, AppError> {
        let student = sqlx::query_as::<_, Student>(
            r#"
            WITH s AS (
                UPDATE students
                SET name = COALESCE($2, name),
                    class = COALESCE($3, class),
                    updated_at = NOW()
                WHERE id = $1
                RETURNING id, user_id, name, class, created_at, updated_at
            )
            SELECT s.id, s.user_id, s.name, s.class, u.email, s.created_at, s.updated_at
            FROM s
            JOIN users u ON s.user_id = u.id
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(class)
        .fetch_optional(&self.pool)
        .await?;

        Ok(student)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
