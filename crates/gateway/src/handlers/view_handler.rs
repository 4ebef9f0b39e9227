//! View routing handlers.

use axum::{
    extract::{Extension, Query},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::middleware::{CurrentUser, OptionalUser};
use crate::state::AppState;
use crate::views::{resolve, NavItem, RouteOutcome, View};

/// View to resolve
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResolveQuery {
    #[serde(default)]
    pub path: String,
}

/// Routing decision
#[derive(Debug, Serialize, ToSchema)]
pub struct ViewResolution {
    /// `render` or `redirect`
    pub action: &'static str,
    pub path: &'static str,
    pub title: &'static str,
}

impl From<RouteOutcome> for ViewResolution {
    fn from(outcome: RouteOutcome) -> Self {
        let view = outcome.view();
        Self {
            action: match outcome {
                RouteOutcome::Render(_) => "render",
                RouteOutcome::Redirect(_) => "redirect",
            },
            path: view.path(),
            title: view.title(),
        }
    }
}

/// Public view routes
pub fn view_routes() -> Router<AppState> {
    Router::new().route("/resolve", get(resolve_view))
}

/// View routes that need a session
pub fn nav_routes() -> Router<AppState> {
    Router::new().route("/nav", get(navigation))
}

/// Decide which view to show for a path
#[utoipa::path(
    get,
    path = "/views/resolve",
    tag = "Views",
    params(ResolveQuery),
    responses(
        (status = 200, description = "Routing decision", body = ViewResolution)
    )
)]
pub async fn resolve_view(
    OptionalUser(user): OptionalUser,
    Query(query): Query<ResolveQuery>,
) -> Json<ViewResolution> {
    Json(resolve(&query.path, user.as_ref()).into())
}

/// Navigation entries for the caller's role
#[utoipa::path(
    get,
    path = "/views/nav",
    tag = "Views",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Navigation entries", body = Vec<NavItem>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn navigation(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<Vec<NavItem>> {
    Json(
        View::nav_items(user.role)
            .iter()
            .copied()
            .map(NavItem::from)
            .collect(),
    )
}
