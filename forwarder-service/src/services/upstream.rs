//! Upstream HTTP client for the forwarding endpoints.
//!
//! One shared `reqwest::Client` serves every request; each call either
//! succeeds with a body and the time it took, captures the upstream's
//! error reply, or fails at the transport layer.

use crate::config::UpstreamConfig;
use metrics::{counter, histogram};
use reqwest::header::HeaderMap;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};

/// Outcome of a single upstream GET.
///
/// Upstream failures are data, not exceptions: a non-2xx reply is captured
/// with everything needed to re-surface it, and transport faults (DNS,
/// refused connection, timeout) are a separate class the handlers map to
/// a gateway error.
#[derive(Debug)]
pub enum UpstreamResult {
    Success {
        body: String,
        elapsed: Duration,
    },
    HttpError {
        status: StatusCode,
        headers: HeaderMap,
        body: String,
    },
    TransportError {
        source: reqwest::Error,
    },
}

#[derive(Clone)]
pub struct UpstreamClient {
    client: Client,
    config: UpstreamConfig,
}

impl UpstreamClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn uri(&self) -> &str {
        &self.config.uri
    }

    /// Issue a GET to the configured upstream carrying `headers`.
    ///
    /// Elapsed time covers the window from issuing the request to the full
    /// body being received; service-side work before and after is excluded.
    pub async fn get(&self, headers: HeaderMap) -> UpstreamResult {
        let start = Instant::now();

        let response = match self
            .client
            .get(&self.config.uri)
            .headers(headers)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(upstream = %self.config.uri, error = %e, "Upstream request failed");
                record_upstream_call("transport_error", start.elapsed());
                return UpstreamResult::TransportError { source: e };
            }
        };

        let status = response.status();
        let response_headers = response.headers().clone();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::error!(upstream = %self.config.uri, error = %e, "Failed to read upstream body");
                record_upstream_call("transport_error", start.elapsed());
                return UpstreamResult::TransportError { source: e };
            }
        };
        let elapsed = start.elapsed();

        tracing::debug!(
            upstream = %self.config.uri,
            status = %status,
            elapsed_ms = elapsed.as_millis() as u64,
            "Upstream response"
        );

        if status.is_success() {
            record_upstream_call("success", elapsed);
            UpstreamResult::Success { body, elapsed }
        } else {
            record_upstream_call("http_error", elapsed);
            UpstreamResult::HttpError {
                status,
                headers: response_headers,
                body,
            }
        }
    }
}

fn record_upstream_call(outcome: &'static str, elapsed: Duration) {
    let labels = [("outcome", outcome)];
    counter!("upstream_requests_total", &labels).increment(1);
    histogram!("upstream_request_duration_seconds", &labels).record(elapsed.as_secs_f64());
}
