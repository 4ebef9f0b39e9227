//! Bearer token authentication.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use common::AppError;
use domain::{User, BEARER_TOKEN_PREFIX};

use crate::state::AppState;

/// Authenticated user resolved from the bearer token.
#[derive(Clone, Debug)]
pub struct CurrentUser(pub User);

/// The raw bearer token of the current request.
#[derive(Clone, Debug)]
pub struct BearerToken(pub String);

/// Authentication middleware.
///
/// Verifies the token and injects [`CurrentUser`] and [`BearerToken`] into
/// the request extensions.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_TOKEN_PREFIX))
        .ok_or(AppError::Unauthorized)?
        .to_string();

    let user = state.auth_service.verify_token(&token).await?;

    request.extensions_mut().insert(CurrentUser(user));
    request.extensions_mut().insert(BearerToken(token));

    Ok(next.run(request).await)
}

/// Session of the caller if a valid bearer token is present.
///
/// Never rejects: a missing, malformed or revoked token yields `None`.
#[derive(Clone, Debug)]
pub struct OptionalUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for OptionalUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await;
        let Ok(TypedHeader(Authorization(bearer))) = header else {
            return Ok(OptionalUser(None));
        };

        let user = state.auth_service.verify_token(bearer.token()).await.ok();
        Ok(OptionalUser(user))
    }
}
