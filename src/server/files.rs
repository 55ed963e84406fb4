use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::ServerState;

const INDEX: &str = "index.html";

/// `Cache-Control` for a served file: an hour for pages, a year for assets.
pub fn cache_control_for(path: &Path) -> Option<&'static str> {
    match extension(path) {
        "html" => Some("public, max-age=3600"),
        "js" | "css" | "woff" | "woff2" | "ttf" | "eot" => Some("public, max-age=31536000"),
        _ => None,
    }
}

pub fn content_type_for(path: &Path) -> &'static str {
    match extension(path) {
        "html" => "text/html; charset=utf-8",
        "js" => "text/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json",
        "txt" => "text/plain; charset=utf-8",
        "svg" => "image/svg+xml",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "ico" => "image/x-icon",
        "webp" => "image/webp",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        _ => "application/octet-stream",
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|ext| ext.to_str()).unwrap_or("")
}

/// `GET /robots.txt`
pub(crate) async fn robots_handler(State(state): State<Arc<ServerState>>) -> Response {
    match tokio::fs::read(&state.robots_path).await {
        Ok(body) => {
            let mut response = (StatusCode::OK, body).into_response();
            let headers = response.headers_mut();
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            );
            headers.insert(
                header::CACHE_CONTROL,
                HeaderValue::from_static("public, max-age=86400"),
            );
            response
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Static files, falling back to `index.html` for anything unknown.
pub(crate) async fn static_handler(
    State(state): State<Arc<ServerState>>,
    method: Method,
    uri: Uri,
) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    }

    if let Some(path) = resolve(&state.static_dir, uri.path()) {
        if let Ok(body) = tokio::fs::read(&path).await {
            return file_response(&path, body);
        }
    }

    let index = state.static_dir.join(INDEX);
    debug!(path = uri.path(), "serving index.html fallback");
    match tokio::fs::read(&index).await {
        Ok(body) => file_response(&index, body),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Map a request path into `static_dir`. Paths that try to climb out of it
/// resolve to nothing.
fn resolve(static_dir: &Path, request_path: &str) -> Option<PathBuf> {
    let relative = request_path.trim_start_matches('/');
    let relative = if relative.is_empty() { INDEX } else { relative };

    let relative = Path::new(relative);
    if relative
        .components()
        .any(|part| !matches!(part, Component::Normal(_)))
    {
        return None;
    }
    Some(static_dir.join(relative))
}

fn file_response(path: &Path, body: Vec<u8>) -> Response {
    let mut response = (StatusCode::OK, body).into_response();
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(path)),
    );
    if let Some(cache) = cache_control_for(path) {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(cache));
    }
    headers.insert(header::VARY, HeaderValue::from_static("Accept-Encoding"));
    response
}
