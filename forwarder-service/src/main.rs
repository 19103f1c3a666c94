use forwarder_service::config::Config;
use forwarder_service::observability::logging::init_tracing;
use forwarder_service::services::init_metrics;
use forwarder_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing("info,forwarder_service=debug");

    let config = Config::load()?;

    init_metrics();

    let application = Application::build(config).await?;
    application.run_until_stopped().await?;

    Ok(())
}
