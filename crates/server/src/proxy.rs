//! Request-rewriting reverse proxy for the viewer's API calls.
//!
//! Any path the docs routes don't claim is an API call made by the hosted
//! page against its own origin. The viewer's interceptor rewrites the page
//! origin to the configured API origin; the rewritten request is dispatched
//! and its response relayed back. Spec-document suffixes are never proxied.

use crate::state::AppState;
use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Upper bound on buffered request bodies (16 MiB).
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

pub async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let Some(interceptor) = &state.viewer().request_interceptor else {
        return not_found();
    };

    let (parts, body) = req.into_parts();
    let incoming = format!(
        "{}{}",
        state.page_origin(),
        parts.uri.path_and_query().map_or("/", |pq| pq.as_str())
    );

    let target = interceptor.rewrite_url(&incoming, state.page_origin());
    if target == incoming {
        // The interceptor declined to redirect (a spec-document suffix);
        // nothing upstream can answer for it.
        return not_found();
    }

    let body = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to buffer proxy request body: {e}");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
    };

    let mut outbound = state
        .client()
        .request(parts.method.clone(), &target)
        .headers(forwardable_headers(&parts.headers));
    if !body.is_empty() {
        outbound = outbound.body(body);
    }

    match outbound.send().await {
        Ok(resp) => relay(resp).await,
        Err(e) => {
            warn!(url = %target, "proxy dispatch failed: {e}");
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}

async fn relay(resp: reqwest::Response) -> Response {
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = match resp.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("failed to read upstream response body: {e}");
            return (StatusCode::BAD_GATEWAY, "Upstream response failed").into_response();
        }
    };

    let mut response = Response::builder().status(status);
    if let Some(out_headers) = response.headers_mut() {
        for (name, value) in &headers {
            if is_hop_by_hop(name.as_str()) || name == header::CONTENT_LENGTH {
                continue;
            }
            out_headers.append(name.clone(), value.clone());
        }
    }
    response
        .body(Body::from(bytes))
        .unwrap_or_else(|_| StatusCode::BAD_GATEWAY.into_response())
}

/// Headers forwarded upstream. Hop-by-hop headers stay on this hop, and the
/// transport recomputes host and content-length.
fn forwardable_headers(headers: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::new();
    for (name, value) in headers {
        if is_hop_by_hop(name.as_str())
            || name == header::HOST
            || name == header::CONTENT_LENGTH
        {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

fn is_hop_by_hop(name: &str) -> bool {
    matches!(
        name,
        "connection"
            | "keep-alive"
            | "proxy-authenticate"
            | "proxy-authorization"
            | "te"
            | "trailer"
            | "transfer-encoding"
            | "upgrade"
    )
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}
