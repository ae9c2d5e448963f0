//! `POST /ask` and a JSON 404 for every other route.

mod handlers;
mod models;

use axum::{routing::post, Router};

use crate::AppState;

pub use models::ErrorResponse;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ask", post(handlers::ask))
        .fallback(handlers::not_found)
        .with_state(state)
}
