use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::capture_page))
        .route("/mood/select", post(handlers::select_mood))
        .route("/mood/save", post(handlers::save_mood))
        .route("/history", get(handlers::history_page))
        .route("/insight", get(handlers::insight_page))
        .route("/settings", get(handlers::settings_page))
        .route("/theme/toggle", post(handlers::toggle_theme))
        .route("/theme/select", post(handlers::select_theme))
        .route("/api/entries", get(handlers::list_entries).post(handlers::create_entry))
        .route("/api/insight", get(handlers::get_insight))
        .route("/api/theme", get(handlers::get_theme).post(handlers::set_theme))
        .route("/api/theme/toggle", post(handlers::toggle_theme_api))
        .with_state(state)
}
