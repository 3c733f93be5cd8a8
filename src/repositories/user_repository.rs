// src/repositories/user_repository.rs

use sqlx::PgPool;

use crate::{
    error::{AppError, is_unique_violation},
    models::user::{NewUser, Role, User},
};

/// Name and class for the student profile created alongside a student user.
#[derive(Debug)]
pub struct ProfileSeed<'a> {
    pub name: &'a str,
    pub class: &'a str,
}

#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, role, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password, email, role, created_at, updated_at
            FROM users
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    /// Inserts a user and, for the student role, its student profile in one transaction.
    ///
    /// A taken username surfaces as `BadRequest` and leaves no rows behind.
    pub async fn create(
        &self,
        new_user: NewUser<'_>,
        profile: Option<ProfileSeed<'_>>,
    ) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, email, role, created_at, updated_at
            "#,
        )
        .bind(new_user.username)
        .bind(new_user.password_hash)
        .bind(new_user.email)
        .bind(new_user.role)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::BadRequest(format!("Username '{}' already exists", new_user.username))
            } else {
                AppError::from(e)
            }
        })?;

        if let (Role::Student, Some(profile)) = (user.role, profile) {
            sqlx::query("INSERT INTO students (user_id, name, class) VALUES ($1, $2, $3)")
                .bind(user.id)
                .bind(profile.name)
                .bind(profile.class)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(user)
    }

    /// Returns `false` when no user had this id.
    pub async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
