// src/handlers/status.rs

use axum::response::IntoResponse;
use serde_json::json;

use crate::api::data;

/// Liveness probe. Does not touch the database.
pub async fn status() -> impl IntoResponse {
    data(json!({
        "status": "online",
        "time": chrono::Utc::now().to_rfc3339(),
    }))
}
