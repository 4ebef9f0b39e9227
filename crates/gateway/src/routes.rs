//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{
    account_routes, auth_routes, employee_routes, health_routes, nav_routes, report_routes,
    view_routes,
};
use crate::middleware::auth_middleware;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    let protected = |routes: Router<AppState>| {
        routes.route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
    };

    Router::new()
        // Health check (no auth)
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Login and registration are public; logout and me need a session
        .nest("/auth", auth_routes(state.clone()))
        .nest("/employees", protected(employee_routes()))
        .nest("/accounts", protected(account_routes()))
        .nest("/reports", protected(report_routes()))
        .nest("/views", view_routes().merge(protected(nav_routes())))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
