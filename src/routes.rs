// src/routes.rs

use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, HeaderValue, Method, header},
    middleware,
    routing::{delete, get, post, put},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{
    error::AppError,
    handlers::{answers, auth, questions, status, students, users},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware, staff_middleware},
};

/// Builds the CORS policy from the configured origins.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::CONTENT_LENGTH, header::CONTENT_TYPE])
        .allow_credentials(true)
        .max_age(Duration::from_secs(12 * 60 * 60))
}

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

/// Assembles the main application router.
///
/// * Public: status, login, register.
/// * Everything else requires a bearer token; management routes additionally
///   require the admin or teacher role, user administration the admin role.
/// * Global middleware: request tracing, security headers, CORS.
pub fn create_router(state: AppState) -> Router {
    let auth_layer = middleware::from_fn_with_state(state.clone(), auth_middleware);

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(
            Router::new()
                .route("/me", get(auth::me))
                .route_layer(auth_layer.clone()),
        );

    let student_routes = Router::new()
        .route("/profile/me", get(students::my_profile))
        .route("/{id}", get(students::get_student))
        .merge(
            Router::new()
                .route("/", get(students::list_students).post(students::create_student))
                .route(
                    "/{id}",
                    put(students::update_student).delete(students::delete_student),
                )
                .route_layer(middleware::from_fn(staff_middleware)),
        )
        .route_layer(auth_layer.clone());

    let question_routes = Router::new()
        .route("/", get(questions::list_questions))
        .route("/{id}", get(questions::get_question))
        .merge(
            Router::new()
                .route("/", post(questions::create_question))
                .route(
                    "/{id}",
                    put(questions::update_question).delete(questions::delete_question),
                )
                .route_layer(middleware::from_fn(staff_middleware)),
        )
        .route_layer(auth_layer.clone());

    let answer_routes = Router::new()
        .route("/my", get(answers::my_answers))
        .route("/my/question/{question_id}", get(answers::my_answer_for_question))
        .route("/submit", post(answers::submit_answer))
        .merge(
            Router::new()
                .route("/", get(answers::list_all_answers))
                .route("/{id}/grade", put(answers::grade_answer))
                .route_layer(middleware::from_fn(staff_middleware)),
        )
        .route_layer(auth_layer.clone());

    // Double middleware protection: Auth first, then Admin check
    let user_routes = Router::new()
        .route("/", get(users::list_users).post(users::create_user))
        .route("/{id}", delete(users::delete_user))
        .route_layer(middleware::from_fn(admin_middleware))
        .route_layer(auth_layer);

    let security_headers = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'self'"),
        ));

    Router::new()
        .route("/api/status", get(status::status))
        .nest("/api/auth", auth_routes)
        .nest("/api/students", student_routes)
        .nest("/api/questions", question_routes)
        .nest("/api/answers", answer_routes)
        .nest("/api/users", user_routes)
        .fallback(not_found)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_origins))
                .layer(security_headers),
        )
        .with_state(state)
}
