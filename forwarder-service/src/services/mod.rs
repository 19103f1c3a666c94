pub mod metrics;
pub mod upstream;

pub use metrics::{get_metrics, init_metrics};
pub use upstream::{UpstreamClient, UpstreamResult};
