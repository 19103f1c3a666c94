//! Logging setup and tracing-header propagation.
pub mod logging;
pub mod trace_headers;

pub use trace_headers::{extract_request_id, extract_trace_headers, TRACE_CONTEXT_HEADERS};
