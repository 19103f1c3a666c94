//! Forwarding endpoints: one upstream GET per inbound request.
//!
//! `/` queries the upstream bare; `/v1` carries the tracing allow-list
//! along. Both annotate the reply with the service instance that answered
//! and how long the upstream took.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

use crate::error::AppError;
use crate::observability::trace_headers::extract_trace_headers;
use crate::services::upstream::UpstreamResult;
use crate::startup::AppState;

/// Connection-scoped headers that must not be copied from the upstream
/// response onto ours.
const HOP_BY_HOP_HEADERS: [&str; 9] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-length",
];

/// `GET /`: query the upstream without propagating any inbound headers.
pub async fn forward_root(State(state): State<AppState>) -> Result<Response, AppError> {
    let result = state.upstream.get(HeaderMap::new()).await;
    render_forwarded(result, &state, "")
}

/// `GET /v1`: propagate the tracing allow-list onto the upstream call.
pub async fn forward_v1(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let outbound = extract_trace_headers(&headers);
    let result = state.upstream.get(outbound).await;
    render_forwarded(result, &state, "[v1]")
}

fn render_forwarded(
    result: UpstreamResult,
    state: &AppState,
    tag: &str,
) -> Result<Response, AppError> {
    match result {
        UpstreamResult::Success { body, elapsed } => {
            let text = format!(
                "{}{}-{}ms\n{} -> {}",
                state.config.service_name,
                tag,
                elapsed.as_millis(),
                state.upstream.uri(),
                body,
            );
            Ok(text.into_response())
        }
        UpstreamResult::HttpError {
            status,
            headers,
            body,
        } => {
            tracing::warn!(
                upstream = %state.upstream.uri(),
                status = %status,
                "Upstream returned an error status"
            );
            Ok((status, surfaced_headers(&headers), body).into_response())
        }
        UpstreamResult::TransportError { source } => Err(AppError::BadGateway(format!(
            "upstream {} unreachable: {}",
            state.upstream.uri(),
            source
        ))),
    }
}

/// Copy upstream response headers, dropping the hop-by-hop ones that only
/// applied to our connection with the upstream.
fn surfaced_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut headers = HeaderMap::new();
    for (name, value) in upstream {
        if !HOP_BY_HOP_HEADERS.contains(&name.as_str()) {
            headers.append(name.clone(), value.clone());
        }
    }
    headers
}
