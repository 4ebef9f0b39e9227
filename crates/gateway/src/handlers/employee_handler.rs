//! Employee record handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use common::{AppError, AppResult};
use domain::{Education, Employee, EmployeeFilter, EmployeeId, Family, FormOptions, NewEmployee};
use record_service_lib::service::{AccountCredentials, DirectoryFacets};

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Administrator request for a new employee
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEmployeeRequest {
    pub employee: NewEmployee,
    /// Creates a linked USER account when both fields are non-empty
    #[serde(default)]
    pub account: Option<AccountCredentials>,
}

/// Own-record search query
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Name, position, national-ID or employee number
    #[serde(default)]
    pub q: String,
}

/// Create employee routes
pub fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_employees).post(create_employee))
        .route("/facets", get(directory_facets))
        .route("/options", get(form_options))
        .route("/unassigned", get(unassigned_employees))
        .route("/search", get(search_own))
        .route(
            "/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/:id/family", put(update_family))
        .route("/:id/education", put(update_education))
}

/// List employees, newest first (admin only)
#[utoipa::path(
    get,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(EmployeeFilter),
    responses(
        (status = 200, description = "Matching employees", body = Vec<Employee>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_employees(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> AppResult<Json<Vec<Employee>>> {
    let employees = state.employee_service.list_employees(&user, &filter).await?;
    Ok(Json(employees))
}

/// Create an employee, optionally with an account (admin only)
#[utoipa::path(
    post,
    path = "/employees",
    tag = "Employees",
    security(("bearer_auth" = [])),
    request_body = CreateEmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Validation error"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn create_employee(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateEmployeeRequest>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    let employee = state
        .employee_service
        .add_employee(&user, payload.employee, payload.account)
        .await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// Distinct positions and grades (admin only)
#[utoipa::path(
    get,
    path = "/employees/facets",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Filter options", body = DirectoryFacets),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn directory_facets(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DirectoryFacets>> {
    Ok(Json(state.employee_service.directory_facets(&user).await?))
}

/// Option sets for the employee forms
#[utoipa::path(
    get,
    path = "/employees/options",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Form option sets", body = FormOptions),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn form_options() -> Json<FormOptions> {
    Json(FormOptions::default())
}

/// Employees without an account (admin only)
#[utoipa::path(
    get,
    path = "/employees/unassigned",
    tag = "Employees",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unlinked employees", body = Vec<Employee>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn unassigned_employees(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Employee>>> {
    Ok(Json(state.account_service.unassigned_employees(&user).await?))
}

/// Search the caller's own record
#[utoipa::path(
    get,
    path = "/employees/search",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "The caller's record matches", body = Employee),
        (status = 403, description = "Forbidden - User accounts only"),
        (status = 404, description = "No match")
    )
)]
pub async fn search_own(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Employee>> {
    state
        .employee_service
        .search_own(&user, &query.q)
        .await?
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Get one employee (own record or admin)
#[utoipa::path(
    get,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "Employee record", body = Employee),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn get_employee(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> AppResult<Json<Employee>> {
    Ok(Json(state.employee_service.get_employee(&user, &id).await?))
}

/// Replace personal and employment data (own record or admin)
#[utoipa::path(
    put,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    request_body = Employee,
    responses(
        (status = 200, description = "Updated record", body = Employee),
        (status = 400, description = "Path and body ids differ"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_employee(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(employee): Json<Employee>,
) -> AppResult<Json<Employee>> {
    if employee.id != id {
        return Err(AppError::BadRequest(
            "Employee id in path and body differ".to_string(),
        ));
    }
    Ok(Json(state.employee_service.update_employee(&user, employee).await?))
}

/// Delete an employee and its linked accounts (admin only)
#[utoipa::path(
    delete,
    path = "/employees/{id}",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    responses(
        (status = 204, description = "Employee deleted"),
        (status = 403, description = "Forbidden - Admin only"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn delete_employee(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
) -> AppResult<StatusCode> {
    if state.employee_service.delete_employee(&user, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// Replace the family record (own record or admin)
#[utoipa::path(
    put,
    path = "/employees/{id}/family",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    request_body = Family,
    responses(
        (status = 204, description = "Family record saved"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_family(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(family): Json<Family>,
) -> AppResult<StatusCode> {
    state.employee_service.update_family(&user, &id, family).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Replace the education history (own record or admin)
#[utoipa::path(
    put,
    path = "/employees/{id}/education",
    tag = "Employees",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Employee ID")),
    request_body = Vec<Education>,
    responses(
        (status = 204, description = "Education history saved"),
        (status = 404, description = "Employee not found")
    )
)]
pub async fn update_education(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<EmployeeId>,
    Json(education): Json<Vec<Education>>,
) -> AppResult<StatusCode> {
    state
        .employee_service
        .update_education(&user, &id, education)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
