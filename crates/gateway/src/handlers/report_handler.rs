//! Report handlers (admin only).

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;

use common::AppResult;
use record_service_lib::service::{DashboardStats, ExportFormat, ExportReceipt};

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Export request
#[derive(Debug, Deserialize, ToSchema)]
pub struct ExportRequest {
    pub format: ExportFormat,
}

/// Create report routes
pub fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/export", post(export))
}

/// Aggregate statistics
#[utoipa::path(
    get,
    path = "/reports/dashboard",
    tag = "Reports",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Dashboard figures", body = DashboardStats),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn dashboard(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<DashboardStats>> {
    Ok(Json(state.report_service.dashboard(&user).await?))
}

/// Request an export of all employee data
#[utoipa::path(
    post,
    path = "/reports/export",
    tag = "Reports",
    security(("bearer_auth" = [])),
    request_body = ExportRequest,
    responses(
        (status = 202, description = "Export accepted", body = ExportReceipt),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn export(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<ExportRequest>,
) -> AppResult<(StatusCode, Json<ExportReceipt>)> {
    let receipt = state.report_service.export(&user, payload.format).await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)))
}
