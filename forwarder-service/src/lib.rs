//! forwarder-service: a trace-propagating HTTP edge service.
//!
//! Every inbound request triggers a single GET to the configured upstream.
//! The `/v1` endpoint carries a fixed allow-list of distributed-tracing
//! headers along with it.
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod services;
pub mod startup;
