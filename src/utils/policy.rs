// src/utils/policy.rs

use crate::{error::AppError, models::user::Role};

/// Roles allowed to manage students, questions and grades.
pub const STAFF: &[Role] = &[Role::Admin, Role::Teacher];

/// Exact set-membership check of `role` against `allowed`.
pub fn authorize(role: Role, allowed: &[Role]) -> Result<(), AppError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        ))
    }
}

/// Staff may read any student record; a student only the one they own.
///
/// `owner_user_id` is the `user_id` of the looked-up record, not the path id.
pub fn authorize_student_read(
    role: Role,
    caller_user_id: i64,
    owner_user_id: i64,
) -> Result<(), AppError> {
    if role.is_staff() || caller_user_id == owner_user_id {
        Ok(())
    } else {
        Err(AppError::Forbidden(
            "Students may only view their own profile".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staff_roles_pass_staff_gate() {
        assert!(authorize(Role::Admin, STAFF).is_ok());
        assert!(authorize(Role::Teacher, STAFF).is_ok());
    }

    #[test]
    fn student_is_denied_with_forbidden() {
        let err = authorize(Role::Student, STAFF).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[test]
    fn admin_only_gate_rejects_teacher() {
        assert!(authorize(Role::Teacher, &[Role::Admin]).is_err());
    }

    #[test]
    fn student_reads_only_own_record() {
        assert!(authorize_student_read(Role::Student, 42, 42).is_ok());
        assert!(matches!(
            authorize_student_read(Role::Student, 42, 43),
            Err(AppError::Forbidden(_))
        ));
        assert!(authorize_student_read(Role::Teacher, 1, 43).is_ok());
        assert!(authorize_student_read(Role::Admin, 1, 43).is_ok());
    }
}
