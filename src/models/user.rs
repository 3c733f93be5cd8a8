// src/models/user.rs

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is valid"));

/// User role. Stored as the `user_role` Postgres enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    #[default]
    Student,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }

    /// Admins and teachers manage students, questions and grades.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents the 'users' table in the database.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: i64,

    /// Unique username.
    pub username: String,

    /// Argon2 password hash.
    /// Skipped during serialization to prevent leaking sensitive data.
    #[serde(skip)]
    pub password: String,

    pub email: String,

    pub role: Role,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Fields needed to insert a user; `password_hash` is already hashed.
#[derive(Debug)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub role: Role,
}

/// DTO for self-registration.
/// Only student accounts can be created this way; `name` and `class` seed the student profile.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username length must be between 3 and 50 characters."
        ),
        regex(
            path = *USERNAME_RE,
            message = "Username may only contain letters, digits, '_', '.' and '-'."
        )
    )]
    pub username: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,
    #[validate(email(message = "Email address is not valid."))]
    pub email: String,
    pub role: Option<Role>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub class: Option<String>,
}

/// DTO for user login.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    pub password: String,
}

/// DTO for an admin creating a user with an explicit role.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[validate(
        length(
            min = 3,
            max = 50,
            message = "Username length must be between 3 and 50 characters."
        ),
        regex(path = *USERNAME_RE)
    )]
    pub username: String,
    #[validate(length(
        min = 6,
        max = 128,
        message = "Password length must be between 6 and 128 characters."
    ))]
    pub password: String,
    #[validate(email)]
    pub email: String,
    pub role: Role,
}

/// Returned by login and registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(username: &str, password: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            email: email.to_string(),
            role: None,
            name: None,
            class: None,
        }
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Teacher).unwrap(), "\"teacher\"");
        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Admin);
    }

    #[test]
    fn only_admin_and_teacher_are_staff() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Teacher.is_staff());
        assert!(!Role::Student.is_staff());
    }

    #[test]
    fn register_validation() {
        assert!(register("budi_s", "secret123", "budi@example.com").validate().is_ok());
        assert!(register("yo", "secret123", "budi@example.com").validate().is_err());
        assert!(register("budi s", "secret123", "budi@example.com").validate().is_err());
        assert!(register("budi", "123", "budi@example.com").validate().is_err());
        assert!(register("budi", "secret123", "not-an-email").validate().is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let user = User {
            id: 1,
            username: "ani".into(),
            password: "$argon2id$v=19$secret".into(),
            email: "ani@example.com".into(),
            role: Role::Student,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "student");
    }
}
