use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/subscriptions", post(handlers::add_subscription))
        .route("/subscriptions/:id/delete", post(handlers::delete_subscription))
        .route("/toggle/theme", post(handlers::toggle_theme))
        .route("/toggle/mode", post(handlers::toggle_mode))
        .route("/toggle/chart", post(handlers::toggle_chart))
        .route("/insights/refresh", post(handlers::refresh_insights))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
