//! Gateway configuration.

use std::env;

use auth_service_lib::config::AuthServiceConfig;
use common::ServiceConfig;
use record_service_lib::config::RecordServiceConfig;

/// Gateway configuration, including the embedded services.
#[derive(Debug, Clone, Default)]
pub struct GatewayConfig {
    pub service: ServiceConfig,
    pub records: RecordServiceConfig,
    pub auth: AuthServiceConfig,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = ServiceConfig::default();
        Self {
            service: ServiceConfig {
                host: env::var("GATEWAY_HOST").unwrap_or(defaults.host),
                port: env::var("GATEWAY_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(defaults.port),
                log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
                service_name: defaults.service_name,
            },
            records: RecordServiceConfig::from_env(),
            auth: AuthServiceConfig::from_env(),
        }
    }

    /// Socket address string to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service.host, self.service.port)
    }
}
