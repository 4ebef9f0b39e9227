//! Shared configuration structures.

use serde::{Deserialize, Serialize};

/// Base service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Service name for logging and tracing
    pub service_name: String,
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: "dian".to_string(),
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Simulated latency added to every store operation, in milliseconds
    pub latency_ms: u64,
    /// Load the demo employees and accounts at startup
    pub seed_demo_data: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: 0,
            seed_demo_data: true,
        }
    }
}

/// JWT configuration for session tokens.
///
/// No `Default`: a secret always comes from the environment or a generated
/// per-process value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    #[serde(skip_serializing)]
    pub secret: String,
    pub expiration_hours: i64,
}

/// Durable client session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionStorageConfig {
    /// JSON file holding `session.user` and `session.token`
    pub path: String,
}

impl Default for SessionStorageConfig {
    fn default() -> Self {
        Self {
            path: ".dian-session.json".to_string(),
        }
    }
}
