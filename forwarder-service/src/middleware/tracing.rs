use axum::http::HeaderValue;
use axum::{extract::Request, middleware::Next, response::Response};
use uuid::Uuid;

use crate::observability::trace_headers::{extract_request_id, REQUEST_ID_HEADER};

/// Resolve the correlation ID for a request and echo it on the response.
///
/// When the caller sent no `x-request-id`, a fresh UUID is used for the
/// response echo only. The inbound headers are left untouched: the
/// forwarding allow-list must only ever see headers the caller actually
/// sent.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id =
        extract_request_id(req.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());

    let mut response = next.run(req).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
