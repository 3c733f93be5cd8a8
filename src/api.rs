// src/api.rs

//! Request/response plumbing shared by every handler: the JSON body and path
//! extractors and the `{"data": ...}` success envelope.

use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
};
use serde::Serialize;

use crate::error::AppError;

/// JSON body extractor whose rejection is an [`AppError`], so malformed or
/// mistyped bodies come back as `400 {"error": ...}` instead of axum's plain text.
#[derive(Debug)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(AppJson(value))
    }
}

/// Path extractor with the same envelope treatment: `/api/questions/abc`
/// is a `400 {"error": "Invalid ID"}`.
#[derive(Debug)]
pub struct AppPath<T>(pub T);

impl<S, T> FromRequestParts<S> for AppPath<T>
where
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(AppPath(value))
    }
}

/// Success envelope.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

/// Wraps a payload as `{"data": payload}`.
pub fn data<T: Serialize>(payload: T) -> Json<Data<T>> {
    Json(Data { data: payload })
}
