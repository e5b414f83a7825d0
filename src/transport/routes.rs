use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use crate::transport::state::AppState;
use crate::transport::{pages, sse, websocket};
use crate::utils::error::ServerError;

/// Fixed routes the cable mount must not shadow.
pub const RESERVED_PATHS: [&str; 5] = [
    "/",
    "/home/ticker",
    "/home/live",
    "/home/sse",
    "/home/chat",
];

pub fn create_router(state: AppState) -> Result<Router, ServerError> {
    let mount_path = state.settings.cable.mount_path.clone();
    validate_mount_path(&mount_path)?;

    Ok(Router::new()
        .route("/", get(pages::index))
        .route("/home/ticker", get(sse::ticker))
        .route("/home/live", get(sse::live))
        .route("/home/sse", get(pages::sse))
        .route("/home/chat", get(pages::chat))
        .route(&mount_path, get(websocket::cable))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Accepts a literal absolute path that does not collide with a page or
/// push route. Only `[A-Za-z0-9/_.-]` is allowed: no path parameters, and
/// the value is safe to embed in the chat page.
pub fn validate_mount_path(path: &str) -> Result<(), ServerError> {
    let invalid = |reason: &'static str| ServerError::InvalidMountPath {
        path: path.to_string(),
        reason,
    };

    if !path.starts_with('/') {
        return Err(invalid("must start with '/'"));
    }
    if RESERVED_PATHS.contains(&path) {
        return Err(invalid("already used by another route"));
    }
    if path.contains("//") {
        return Err(invalid("contains an empty segment"));
    }
    if !path
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '.' | '-'))
    {
        return Err(invalid("only letters, digits, '/', '_', '.' and '-' are allowed"));
    }
    Ok(())
}
