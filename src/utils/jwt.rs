// src/utils/jwt.rs

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::AppError,
    models::user::Role,
    utils::policy::{STAFF, authorize},
};

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    /// Subject - Stores the User ID (as string).
    pub sub: String,
    pub role: Role,
    /// Issued-at as Unix timestamp.
    pub iat: usize,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

impl Claims {
    /// The authenticated user's id.
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::AuthError("Invalid token".to_string()))
    }
}

fn now_secs() -> Result<usize, AppError> {
    Ok(SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .as_secs() as usize)
}

/// Signs a new HS256 JWT for the user, valid for `expiration_seconds`.
pub fn sign_jwt(
    id: i64,
    role: Role,
    secret: &str,
    expiration_seconds: u64,
) -> Result<String, AppError> {
    let issued_at = now_secs()?;

    let claims = Claims {
        sub: id.to_string(),
        role,
        iat: issued_at,
        exp: issued_at + expiration_seconds as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(e.to_string()))
}

/// Verifies and decodes a JWT string.
///
/// Expired tokens are reported as "Token has expired"; a bad signature or a
/// malformed token as "Invalid token". Both are `AppError::AuthError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::AuthError("Token has expired".to_string()),
        _ => AppError::AuthError("Invalid token".to_string()),
    })?;

    Ok(token_data.claims)
}

/// Axum Middleware: Authentication.
///
/// Validates the 'Authorization: Bearer <token>' header and injects `Claims`
/// into the request extensions for handlers to use. Returns 401 otherwise.
pub async fn auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let token = match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if !token.is_empty() => token,
        _ => {
            return Err(AppError::AuthError(
                "Missing or malformed Authorization header".to_string(),
            ));
        }
    };

    let claims = verify_jwt(token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

fn claims_of(req: &Request<Body>) -> Result<&Claims, AppError> {
    req.extensions()
        .get::<Claims>()
        .ok_or_else(|| AppError::AuthError("Not authenticated".to_string()))
}

/// Axum Middleware: admin or teacher only.
///
/// Must be used AFTER `auth_middleware`. Returns 403 for any other role.
pub async fn staff_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    authorize(claims_of(&req)?.role, STAFF)?;
    Ok(next.run(req).await)
}

/// Axum Middleware: admin only.
///
/// Must be used AFTER `auth_middleware`.
pub async fn admin_middleware(req: Request<Body>, next: Next) -> Result<Response, AppError> {
    authorize(claims_of(&req)?.role, &[Role::Admin])?;
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn issued_token_round_trips() {
        let token = sign_jwt(17, Role::Teacher, SECRET, 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.user_id().unwrap(), 17);
        assert_eq!(claims.role, Role::Teacher);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn default_lifetime_is_a_day() {
        let token = sign_jwt(1, Role::Student, SECRET, 24 * 60 * 60).unwrap();
        let claims = verify_jwt(&token, SECRET).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn expired_token_reports_expiry() {
        let now = now_secs().unwrap();
        let claims = Claims {
            sub: "5".to_string(),
            role: Role::Student,
            iat: now - 25 * 60 * 60,
            exp: now - 60 * 60,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        match verify_jwt(&token, SECRET) {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Token has expired"),
            other => panic!("expected expiry error, got {other:?}"),
        }
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = sign_jwt(3, Role::Admin, SECRET, 60).unwrap();
        match verify_jwt(&token, "another-secret") {
            Err(AppError::AuthError(msg)) => assert_eq!(msg, "Invalid token"),
            other => panic!("expected invalid token, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(
            verify_jwt("not.a.jwt", SECRET),
            Err(AppError::AuthError(_))
        ));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let claims = Claims {
            sub: "budi".to_string(),
            role: Role::Student,
            iat: 0,
            exp: 0,
        };
        assert!(claims.user_id().is_err());
    }
}
