//! Application state for dependency injection.

use std::sync::Arc;

use auth_service_lib::service::AuthService;
use common::AppResult;
use record_service_lib::repository::RecordStore;
use record_service_lib::service::{
    AccountManager, AccountService, EmployeeManager, EmployeeService, ReportManager,
    ReportService,
};

use crate::config::GatewayConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub account_service: Arc<dyn AccountService>,
    pub report_service: Arc<dyn ReportService>,
}

impl AppState {
    /// Create new app state with manually injected services.
    pub fn new(
        auth_service: Arc<dyn AuthService>,
        employee_service: Arc<dyn EmployeeService>,
        account_service: Arc<dyn AccountService>,
        report_service: Arc<dyn ReportService>,
    ) -> Self {
        Self {
            auth_service,
            employee_service,
            account_service,
            report_service,
        }
    }

    /// Wire every service over one shared record store.
    pub fn from_store(store: Arc<dyn RecordStore>, config: &GatewayConfig) -> Self {
        Self::new(
            auth_service_lib::build_auth(&config.auth, store.clone()),
            Arc::new(EmployeeManager::new(store.clone())),
            Arc::new(AccountManager::new(store.clone())),
            Arc::new(ReportManager::new(store)),
        )
    }

    /// Build the store described by the configuration and wire the services.
    pub fn from_config(config: &GatewayConfig) -> AppResult<Self> {
        let store = record_service_lib::build_store(&config.records)?;
        Ok(Self::from_store(store, config))
    }
}
