//! Auth Service Library
//!
//! This crate provides login, registration and bearer tokens on top of the
//! record store, plus the client-side session state machine with its durable
//! storage.

pub mod config;
pub mod service;
pub mod session;

use std::sync::Arc;

use record_service_lib::repository::RecordStore;

use crate::config::AuthServiceConfig;
use crate::service::{AuthService, Authenticator};

/// Build the authenticator for the given record store.
pub fn build_auth(config: &AuthServiceConfig, store: Arc<dyn RecordStore>) -> Arc<dyn AuthService> {
    Arc::new(Authenticator::new(
        store,
        config.jwt.secret.clone(),
        config.jwt.expiration_hours,
    ))
}
