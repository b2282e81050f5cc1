//! API endpoints.

mod account;
mod communities;
mod notifications;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/communities", communities::router())
        .nest("/notifications", notifications::router())
        .nest("/account", account::router())
}
