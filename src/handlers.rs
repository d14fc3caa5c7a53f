use crate::errors::AppError;
use crate::milestones::MILESTONES;
use crate::models::{
    CreateTrackerRequest, MilestoneView, ResetRequest, TimerResponse, TrackerView,
};
use crate::state::AppState;
use crate::tracker::TrackerId;
use crate::ui::render_index;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};

pub async fn index() -> Html<String> {
    Html(render_index())
}

pub async fn list_milestones() -> Json<Vec<MilestoneView>> {
    Json(MILESTONES.iter().map(MilestoneView::from).collect())
}

pub async fn list_trackers(State(state): State<AppState>) -> Json<Vec<TrackerView>> {
    Json(state.views().await)
}

pub async fn create_tracker(
    State(state): State<AppState>,
    Json(payload): Json<CreateTrackerRequest>,
) -> Result<(StatusCode, Json<TrackerView>), AppError> {
    let view = state.create(&payload.title, payload.start.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

pub async fn reset_tracker(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ResetRequest>,
) -> Result<StatusCode, AppError> {
    state.reset(&TrackerId::from(id), payload.confirm).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    let start = state.timer.start_time().await;
    Json(TimerResponse::at(start, state.now_ms()))
}

pub async fn start_timer(State(state): State<AppState>) -> Json<TimerResponse> {
    let now = state.now_ms();
    let start = state.timer.start(now).await;
    Json(TimerResponse::at(Some(start), now))
}

pub async fn reset_timer(
    State(state): State<AppState>,
    Json(payload): Json<ResetRequest>,
) -> Result<StatusCode, AppError> {
    state.timer.reset(payload.confirm).await?;
    Ok(StatusCode::NO_CONTENT)
}
