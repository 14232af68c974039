//! API routes

pub mod health;
pub mod uploads;

use std::any::Any;

use axum::{
    body::Body,
    extract::DefaultBodyLimit,
    http::{header, Method, Request, Response},
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use uuid::Uuid;

use crate::{
    config::Config, error::ApiError, security::security_headers_middleware, state::AppState,
};

/// Create all API routes
pub fn create_router(state: AppState) -> Router {
    // Health check routes (at root level for infrastructure monitoring)
    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness));

    let upload_routes = Router::new()
        .route("/validate-file", post(uploads::validate_file))
        .route("/validate-session", post(uploads::validate_session));

    let router = Router::new()
        .merge(health_routes)
        .nest("/api/uploadapp", upload_routes)
        .fallback(not_found);

    with_middleware(router, &state).with_state(state)
}

/// Wrap `router` in the standard middleware stack.
///
/// Layers from innermost to outermost: body limit, panic recovery, CORS,
/// security headers, tracing. Security headers sit outside everything that
/// can produce a response on its own (extractor rejections, panics, CORS
/// preflights, the 404 fallback) so those responses are covered too.
pub fn with_middleware(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .layer(DefaultBodyLimit::max(state.config.max_request_body_bytes))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(&state.config))
        .layer(middleware::from_fn_with_state(
            state.security_headers.clone(),
            security_headers_middleware,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                    request_id = %Uuid::new_v4(),
                )
            }),
        )
}

/// Unmatched routes get the same error envelope as every other failure
async fn not_found() -> ApiError {
    ApiError::NotFound
}

fn cors_layer(config: &Config) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(config.cors_allowed_origins.clone()))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Turn a handler panic into a plain 500 so outer layers still see a response
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<Body> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "Handler panicked");

    ApiError::Internal.into_response()
}
