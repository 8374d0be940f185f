use super::{SharedUploader, handlers};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, header},
    middleware,
    routing::{get, post},
};
use tower_http::{
    set_header::SetResponseHeaderLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::Level;

pub fn create_app(uploader: SharedUploader, max_body_bytes: usize) -> Router {
    // Configure the router with all API endpoints
    Router::new()
        // Browser upload page
        .route(
            "/",
            get(handlers::index_page).fallback(handlers::method_not_allowed),
        )
        .route(
            "/health",
            get(handlers::health).fallback(handlers::method_not_allowed),
        )
        // Upload endpoint, also reachable under /api for serverless-style clients
        .route(
            "/upload",
            post(handlers::upload).fallback(handlers::method_not_allowed),
        )
        .route(
            "/api/upload",
            post(handlers::upload).fallback(handlers::method_not_allowed),
        )
        .fallback(handlers::not_found)
        // Apply a layer to limit the maximum size of request bodies
        .layer(DefaultBodyLimit::max(max_body_bytes))
        // Short-circuit OPTIONS before routing so every path answers preflight
        .layer(middleware::from_fn(handlers::handle_preflight))
        // Permissive CORS headers on every response, including errors and preflight
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
        // Add tracing for HTTP requests and responses
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        // Provide the shared state
        .with_state(uploader)
}
