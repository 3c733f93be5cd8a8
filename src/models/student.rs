// src/models/student.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Class assigned to profiles created without one.
pub const DEFAULT_CLASS: &str = "Unassigned";

/// A row of the 'students' table joined with the owning user's email.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Student {
    pub id: i64,

    /// Owning user (1:1).
    pub user_id: i64,

    pub name: String,
    pub class: String,

    /// Taken from `users.email`; students have no email column of their own.
    pub email: String,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// DTO for creating a student profile for an existing user.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStudentRequest {
    #[validate(range(min = 1))]
    pub user_id: i64,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 50))]
    pub class: String,
}

/// DTO for updating a student profile. Fields are optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStudentRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub class: Option<String>,
}
