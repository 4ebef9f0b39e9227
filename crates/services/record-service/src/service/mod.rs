//! Record service business logic.

mod account_service;
mod employee_service;
mod report_service;

pub use account_service::{AccountManager, AccountService, CreateAccount};
pub use employee_service::{AccountCredentials, DirectoryFacets, EmployeeManager, EmployeeService};
pub use report_service::{
    DashboardStats, EmployeeSummary, ExportFormat, ExportReceipt, PositionCount, ReportManager,
    ReportService, LATEST_EMPLOYEES,
};
