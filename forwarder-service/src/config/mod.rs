use crate::error::AppError;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    /// Full URI queried on every forwarded request.
    pub uri: String,
}

impl Config {
    pub fn load() -> Result<Self, AppError> {
        dotenv().ok();
        let is_prod = env::var("ENVIRONMENT").unwrap_or_else(|_| "dev".to_string()) == "prod";

        Ok(Config {
            server: ServerConfig {
                host: get_env("SERVICE_HOST", Some("0.0.0.0"), is_prod)?,
                port: get_env("SERVICE_PORT", Some("8080"), is_prod)?
                    .parse()
                    .map_err(|e| {
                        AppError::ConfigError(anyhow::anyhow!(
                            "SERVICE_PORT must be a port number: {}",
                            e
                        ))
                    })?,
            },
            upstream: UpstreamConfig {
                uri: get_env(
                    "UPSTREAM_URI",
                    Some("http://jsonplaceholder.typicode.com/users/1"),
                    is_prod,
                )?,
            },
            service_name: get_env("SERVICE_NAME", Some("frontend"), is_prod)?,
        })
    }
}

fn get_env(key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError> {
    match env::var(key) {
        Ok(val) => Ok(val),
        Err(_) => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
