//! Account management handlers (admin only).

use axum::{
    extract::{Extension, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use common::{AppError, AppResult};
use domain::{AccountId, UserAccount};
use record_service_lib::service::CreateAccount;

use crate::extractors::ValidatedJson;
use crate::middleware::CurrentUser;
use crate::state::AppState;

/// New password for an account
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create account routes
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_accounts).post(create_account))
        .route("/:id", delete(delete_account))
        .route("/:id/reset-password", post(reset_password))
}

/// List all accounts
#[utoipa::path(
    get,
    path = "/accounts",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All accounts", body = Vec<UserAccount>),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn list_accounts(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<UserAccount>>> {
    Ok(Json(state.account_service.list_accounts(&user).await?))
}

/// Create an account, optionally linked to an unassigned employee
#[utoipa::path(
    post,
    path = "/accounts",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    request_body = CreateAccount,
    responses(
        (status = 201, description = "Account created", body = UserAccount),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Employee not found"),
        (status = 409, description = "Username taken or employee already linked")
    )
)]
pub async fn create_account(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Json(payload): Json<CreateAccount>,
) -> AppResult<(StatusCode, Json<UserAccount>)> {
    let account = state.account_service.create_account(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Delete an account; the linked employee stays
#[utoipa::path(
    delete,
    path = "/accounts/{id}",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Account ID")),
    responses(
        (status = 204, description = "Account deleted"),
        (status = 400, description = "Cannot delete own account"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn delete_account(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
) -> AppResult<StatusCode> {
    if state.account_service.delete_account(&user, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound)
    }
}

/// Replace an account's password
#[utoipa::path(
    post,
    path = "/accounts/{id}/reset-password",
    tag = "Accounts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Account ID")),
    request_body = ResetPasswordRequest,
    responses(
        (status = 204, description = "Password replaced"),
        (status = 400, description = "Password too short"),
        (status = 404, description = "Account not found")
    )
)]
pub async fn reset_password(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    State(state): State<AppState>,
    Path(id): Path<AccountId>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    state
        .account_service
        .reset_password(&user, &id, &payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
