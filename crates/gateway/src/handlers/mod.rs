//! HTTP request handlers.

pub mod account_handler;
pub mod auth_handler;
pub mod employee_handler;
pub mod health_handler;
pub mod report_handler;
pub mod view_handler;

pub use account_handler::account_routes;
pub use auth_handler::auth_routes;
pub use employee_handler::employee_routes;
pub use health_handler::health_routes;
pub use report_handler::report_routes;
pub use view_handler::{nav_routes, view_routes};
