//! Authentication handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    middleware,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use common::AppResult;
use domain::{Session, User, TOKEN_TYPE_BEARER};

use crate::extractors::ValidatedJson;
use crate::middleware::{auth_middleware, BearerToken, CurrentUser};
use crate::state::AppState;

/// Self-registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Full name of the new employee
    #[validate(length(min = 1, message = "Name is required"))]
    #[schema(example = "Sari Dewi")]
    pub name: String,
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "sari")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Password and confirmation do not match"))]
    pub confirm_password: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    #[schema(example = "budi")]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "budi")]
    pub password: String,
}

/// Issued session
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
    pub user: User,
}

impl SessionResponse {
    fn new(session: Session, expires_in: i64) -> Self {
        Self {
            token: session.token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in,
            user: session.user,
        }
    }
}

/// Create authentication routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/logout", post(logout))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
        .route("/register", post(register))
        .route("/login", post(login))
}

/// Register a new account with a blank employee record
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered and logged in", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    let session = state
        .auth_service
        .register(&payload.name, &payload.username, &payload.password)
        .await?;

    let expires_in = state.auth_service.expires_in();
    Ok((StatusCode::CREATED, Json(SessionResponse::new(session, expires_in))))
}

/// Login and get a bearer token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = SessionResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid username or password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    let expires_in = state.auth_service.expires_in();
    Ok(Json(SessionResponse::new(session, expires_in)))
}

/// Revoke the current token
#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    Extension(BearerToken(token)): Extension<BearerToken>,
) -> AppResult<StatusCode> {
    state.auth_service.logout(&token).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Current session identity
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user", body = User),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn me(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<User> {
    Json(user)
}
