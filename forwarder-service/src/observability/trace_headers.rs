//! B3 / OpenTracing header propagation for service-to-service calls.
//!
//! Meshes that trace with B3 identifiers (Zipkin, Istio sidecars) rely on
//! the application carrying this fixed set of headers from its inbound
//! request onto every outbound call; the sidecar takes care of the rest.

use axum::http::{HeaderMap, HeaderName};

/// Header name for request correlation ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Headers carried from an inbound request onto the outbound upstream call,
/// in fixed order. Anything outside this list is never propagated.
pub const TRACE_CONTEXT_HEADERS: [&str; 7] = [
    REQUEST_ID_HEADER,
    "x-b3-traceid",
    "x-b3-spanid",
    "x-b3-parentspanid",
    "x-b3-sampled",
    "x-b3-flags",
    "x-ot-span-context",
];

/// Build the outbound header set for an upstream call.
///
/// For each allow-listed name present in `inbound`, the *first* inbound
/// value is copied. Names absent from `inbound` are omitted, never
/// synthesized, so the result's key set is always a subset of
/// [`TRACE_CONTEXT_HEADERS`].
pub fn extract_trace_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut outbound = HeaderMap::new();

    for name in TRACE_CONTEXT_HEADERS {
        if let Some(value) = inbound.get(name) {
            outbound.insert(HeaderName::from_static(name), value.clone());
        }
    }

    outbound
}

/// Extract the correlation ID from incoming request headers.
pub fn extract_request_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extracts_only_allow_listed_headers() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-b3-traceid", "abc123".parse().unwrap());
        inbound.insert("x-unrelated", "zzz".parse().unwrap());

        let outbound = extract_trace_headers(&inbound);

        assert_eq!(outbound.len(), 1);
        assert_eq!(
            outbound.get("x-b3-traceid"),
            Some(&HeaderValue::from_static("abc123"))
        );
        assert!(outbound.get("x-unrelated").is_none());
    }

    #[test]
    fn test_first_value_wins_for_repeated_headers() {
        let mut inbound = HeaderMap::new();
        inbound.append("x-b3-spanid", "first".parse().unwrap());
        inbound.append("x-b3-spanid", "second".parse().unwrap());

        let outbound = extract_trace_headers(&inbound);

        let values: Vec<_> = outbound.get_all("x-b3-spanid").iter().collect();
        assert_eq!(values, vec![&HeaderValue::from_static("first")]);
    }

    #[test]
    fn test_absent_headers_are_not_synthesized() {
        let outbound = extract_trace_headers(&HeaderMap::new());
        assert!(outbound.is_empty());
    }

    #[test]
    fn test_key_set_is_subset_of_allow_list() {
        let mut inbound = HeaderMap::new();
        inbound.insert("x-request-id", "req-1".parse().unwrap());
        inbound.insert("x-b3-sampled", "1".parse().unwrap());
        inbound.insert("x-ot-span-context", "ctx".parse().unwrap());
        inbound.insert("authorization", "Bearer secret".parse().unwrap());
        inbound.insert("cookie", "session=1".parse().unwrap());

        let outbound = extract_trace_headers(&inbound);

        assert_eq!(outbound.len(), 3);
        for name in outbound.keys() {
            assert!(
                TRACE_CONTEXT_HEADERS.contains(&name.as_str()),
                "unexpected header: {}",
                name
            );
        }
    }

    #[test]
    fn test_extract_request_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, "abc-123".parse().unwrap());

        assert_eq!(extract_request_id(&headers), Some("abc-123".to_string()));
        assert_eq!(extract_request_id(&HeaderMap::new()), None);
    }
}
