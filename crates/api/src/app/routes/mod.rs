use axum::Router;

pub mod credits;
pub mod customers;
pub mod system;

/// Router for all `/api` endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/credits", credits::router())
}
