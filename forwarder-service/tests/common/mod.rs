use forwarder_service::config::{Config, ServerConfig, UpstreamConfig};
use forwarder_service::startup::Application;

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the service on a random port, forwarding to `upstream_uri`.
    pub async fn spawn(upstream_uri: &str) -> Self {
        Self::spawn_named(upstream_uri, "frontend").await
    }

    /// Spawn with an explicit service name (shows up in forwarded replies).
    pub async fn spawn_named(upstream_uri: &str, service_name: &str) -> Self {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                // Use random port for testing (port 0)
                port: 0,
            },
            upstream: UpstreamConfig {
                uri: upstream_uri.to_string(),
            },
            service_name: service_name.to_string(),
        };

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        }

        TestApp { address }
    }
}
