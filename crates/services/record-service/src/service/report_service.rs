//! Report service - dashboard statistics and export requests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use common::AppResult;
use domain::{authorize, Employee, EmployeeId, Operation, Resource, User};

use crate::repository::RecordStore;

/// Number of most recent employees shown on the dashboard
pub const LATEST_EMPLOYEES: usize = 5;

/// Headcount of one position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PositionCount {
    pub label: String,
    pub value: usize,
}

/// Short employee entry for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct EmployeeSummary {
    pub id: EmployeeId,
    #[serde(rename = "nama")]
    pub name: String,
    #[serde(rename = "jabatan")]
    pub position: String,
}

impl From<&Employee> for EmployeeSummary {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            name: employee.name.clone(),
            position: employee.position.clone(),
        }
    }
}

/// Administrator dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct DashboardStats {
    pub employee_count: usize,
    pub account_count: usize,
    pub position_count: usize,
    /// Largest first; ties ordered by label
    pub by_position: Vec<PositionCount>,
    /// Newest first
    pub latest_employees: Vec<EmployeeSummary>,
}

/// Requested export document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Excel,
    Pdf,
}

/// Acknowledgement of an export request. No document is generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ExportReceipt {
    pub format: ExportFormat,
    pub record_count: usize,
    pub requested_at: DateTime<Utc>,
}

/// Report service trait for dependency injection.
#[async_trait]
pub trait ReportService: Send + Sync {
    /// Aggregate statistics (admin only)
    async fn dashboard(&self, caller: &User) -> AppResult<DashboardStats>;

    /// Request an export of all employee data (admin only)
    async fn export(&self, caller: &User, format: ExportFormat) -> AppResult<ExportReceipt>;
}

/// Concrete implementation of ReportService using the record store.
pub struct ReportManager {
    store: Arc<dyn RecordStore>,
}

impl ReportManager {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportService for ReportManager {
    async fn dashboard(&self, caller: &User) -> AppResult<DashboardStats> {
        authorize(Some(caller), Resource::Statistics, Operation::Read)?;

        let (employees, accounts) =
            tokio::try_join!(self.store.list_employees(), self.store.list_accounts())?;

        let by_position = count_by_position(&employees);
        Ok(DashboardStats {
            employee_count: employees.len(),
            account_count: accounts.len(),
            position_count: by_position.len(),
            by_position,
            latest_employees: employees
                .iter()
                .take(LATEST_EMPLOYEES)
                .map(EmployeeSummary::from)
                .collect(),
        })
    }

    async fn export(&self, caller: &User, format: ExportFormat) -> AppResult<ExportReceipt> {
        authorize(Some(caller), Resource::ReportExport, Operation::Create)?;

        let record_count = self.store.list_employees().await?.len();
        info!(?format, record_count, by = %caller.username, "Export requested");

        Ok(ExportReceipt {
            format,
            record_count,
            requested_at: Utc::now(),
        })
    }
}

fn count_by_position(employees: &[Employee]) -> Vec<PositionCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for employee in employees {
        *counts.entry(employee.position.as_str()).or_default() += 1;
    }

    let mut by_position: Vec<PositionCount> = counts
        .into_iter()
        .map(|(label, value)| PositionCount {
            label: label.to_string(),
            value,
        })
        .collect();
    by_position.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.label.cmp(&b.label)));
    by_position
}
