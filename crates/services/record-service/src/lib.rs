//! Record Service Library
//!
//! This crate owns the employee and account records: the in-memory store
//! and the access-controlled use cases built on top of it. The gateway
//! embeds it in-process.

pub mod config;
pub mod latency;
pub mod repository;
pub mod service;

use std::sync::Arc;

use common::AppResult;
use tracing::info;

use crate::config::RecordServiceConfig;
use crate::latency::LatencyPolicy;
use crate::repository::{InMemoryStore, RecordStore};

/// Build the record store described by the configuration.
pub fn build_store(config: &RecordServiceConfig) -> AppResult<Arc<dyn RecordStore>> {
    let latency = LatencyPolicy::from_millis(config.store.latency_ms);
    let store = if config.store.seed_demo_data {
        InMemoryStore::seeded(latency)?
    } else {
        InMemoryStore::new(latency)
    };

    info!(
        latency_ms = config.store.latency_ms,
        seeded = config.store.seed_demo_data,
        "Record store ready"
    );
    Ok(Arc::new(store))
}
