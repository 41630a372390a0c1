//! Docs routes: viewer assets, generated initializer, spec document, health.

use crate::state::AppState;
use apiview_spec_tools::content_type::content_type_for;
use axum::Router;
use axum::extract::{Path as RequestPath, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use std::path::{Component, Path, PathBuf};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/openapi.yaml", get(spec_document))
        .route("/docs", get(index))
        .route("/docs/", get(index))
        .route("/docs/swagger-initializer.js", get(initializer))
        .route("/docs/{*path}", get(asset))
        .route("/health", get(health))
}

/// The loaded OpenAPI document, byte-for-byte as authored.
async fn spec_document(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.spec().content_type())],
        state.spec().content().to_string(),
    )
        .into_response()
}

async fn index(State(state): State<AppState>) -> Response {
    serve_asset(&state, "index.html").await
}

/// The generated bootstrap script. Shadows any initializer file shipped
/// inside the asset bundle.
async fn initializer(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/javascript")],
        apiview_viewer::initializer::render(state.viewer()),
    )
        .into_response()
}

async fn asset(State(state): State<AppState>, RequestPath(path): RequestPath<String>) -> Response {
    serve_asset(&state, &path).await
}

async fn health(State(state): State<AppState>) -> StatusCode {
    if state.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn serve_asset(state: &AppState, rel: &str) -> Response {
    let Some(path) = resolve_asset_path(&state.config().ui_dir, rel) else {
        return not_found();
    };
    match tokio::fs::read(&path).await {
        Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type_for(rel))],
            bytes,
        )
            .into_response(),
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Resolve a request path inside the asset directory.
///
/// Only plain path segments are accepted; `..`, absolute paths, and prefix
/// components are rejected so requests cannot escape the directory.
fn resolve_asset_path(ui_dir: &Path, rel: &str) -> Option<PathBuf> {
    let rel_path = Path::new(rel);
    for component in rel_path.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }
    Some(ui_dir.join(rel_path))
}
