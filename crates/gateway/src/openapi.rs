//! OpenAPI documentation.

use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::handlers::account_handler::ResetPasswordRequest;
use crate::handlers::auth_handler::{LoginRequest, RegisterRequest, SessionResponse};
use crate::handlers::employee_handler::CreateEmployeeRequest;
use crate::handlers::health_handler::HealthResponse;
use crate::handlers::report_handler::ExportRequest;
use crate::handlers::view_handler::ViewResolution;
use crate::views::NavItem;
use domain::{
    AccountId, Child, Education, EducationLevel, Employee, EmployeeId, Family, FormOptions,
    MaritalStatus, NewEmployee, Role, Sex, Spouse, User, UserAccount,
};
use record_service_lib::service::{
    AccountCredentials, CreateAccount, DashboardStats, DirectoryFacets, EmployeeSummary,
    ExportFormat, ExportReceipt, PositionCount,
};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health_handler::health_check,
        crate::handlers::auth_handler::register,
        crate::handlers::auth_handler::login,
        crate::handlers::auth_handler::logout,
        crate::handlers::auth_handler::me,
        crate::handlers::employee_handler::list_employees,
        crate::handlers::employee_handler::create_employee,
        crate::handlers::employee_handler::directory_facets,
        crate::handlers::employee_handler::form_options,
        crate::handlers::employee_handler::unassigned_employees,
        crate::handlers::employee_handler::search_own,
        crate::handlers::employee_handler::get_employee,
        crate::handlers::employee_handler::update_employee,
        crate::handlers::employee_handler::delete_employee,
        crate::handlers::employee_handler::update_family,
        crate::handlers::employee_handler::update_education,
        crate::handlers::account_handler::list_accounts,
        crate::handlers::account_handler::create_account,
        crate::handlers::account_handler::delete_account,
        crate::handlers::account_handler::reset_password,
        crate::handlers::report_handler::dashboard,
        crate::handlers::report_handler::export,
        crate::handlers::view_handler::resolve_view,
        crate::handlers::view_handler::navigation,
    ),
    components(
        schemas(
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            SessionResponse,
            User,
            Role,
            AccountId,
            EmployeeId,
            Employee,
            NewEmployee,
            Sex,
            MaritalStatus,
            Family,
            Spouse,
            Child,
            Education,
            EducationLevel,
            FormOptions,
            CreateEmployeeRequest,
            AccountCredentials,
            DirectoryFacets,
            UserAccount,
            CreateAccount,
            ResetPasswordRequest,
            DashboardStats,
            PositionCount,
            EmployeeSummary,
            ExportRequest,
            ExportFormat,
            ExportReceipt,
            ViewResolution,
            NavItem,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Authentication", description = "Login, registration and sessions"),
        (name = "Employees", description = "Employee records"),
        (name = "Accounts", description = "User account management"),
        (name = "Reports", description = "Statistics and export"),
        (name = "Views", description = "Role-based view routing"),
    )
)]
pub struct ApiDoc;

/// Security scheme modifier.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
