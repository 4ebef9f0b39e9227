//! Record service configuration.

use std::env;

use common::StoreConfig;

/// Record service configuration.
#[derive(Debug, Clone, Default)]
pub struct RecordServiceConfig {
    pub store: StoreConfig,
}

impl RecordServiceConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = StoreConfig::default();
        Self {
            store: StoreConfig {
                latency_ms: env::var("RECORD_STORE_LATENCY_MS")
                    .ok()
                    .and_then(|ms| ms.parse().ok())
                    .unwrap_or(defaults.latency_ms),
                seed_demo_data: env::var("RECORD_STORE_SEED")
                    .ok()
                    .and_then(|seed| seed.parse().ok())
                    .unwrap_or(defaults.seed_demo_data),
            },
        }
    }
}
