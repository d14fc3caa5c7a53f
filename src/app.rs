use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/milestones", get(handlers::list_milestones))
        .route("/api/trackers", get(handlers::list_trackers).post(handlers::create_tracker))
        .route("/api/trackers/:id/reset", post(handlers::reset_tracker))
        .route("/api/timer", get(handlers::get_timer).post(handlers::start_timer))
        .route("/api/timer/reset", post(handlers::reset_timer))
        .with_state(state)
}
