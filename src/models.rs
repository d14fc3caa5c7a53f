use crate::elapsed::Elapsed;
use crate::milestones::{self, MILESTONES, Milestone};
use crate::tracker::Tracker;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateTrackerRequest {
    pub title: String,
    /// Absent means "start now".
    #[serde(default)]
    pub start: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ResetRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct MilestoneView {
    pub threshold_secs: u64,
    pub label: String,
    pub message: &'static str,
    pub icon: &'static str,
}

impl From<&Milestone> for MilestoneView {
    fn from(milestone: &Milestone) -> Self {
        Self {
            threshold_secs: milestone.threshold_secs,
            label: milestone.label(),
            message: milestone.message,
            icon: milestone.icon,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AchievedView {
    pub message: String,
    pub icon: &'static str,
}

impl AchievedView {
    fn of(message: &str) -> Self {
        Self {
            message: message.to_string(),
            icon: milestones::find(message).map(|m| m.icon).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TrackerView {
    pub id: String,
    pub title: String,
    pub start_time: i64,
    pub elapsed: Elapsed,
    pub display: String,
    pub total_seconds: u64,
    pub achieved: Vec<AchievedView>,
    pub recent: Option<AchievedView>,
    pub achieved_count: usize,
    pub milestone_count: usize,
    pub progress: f64,
}

impl TrackerView {
    pub fn of(tracker: &Tracker, now_ms: i64) -> Self {
        let elapsed = Elapsed::between(tracker.start_time, now_ms);
        Self {
            id: tracker.id.to_string(),
            title: tracker.title.clone(),
            start_time: tracker.start_time,
            display: elapsed.to_string(),
            total_seconds: elapsed.total_seconds(),
            elapsed,
            achieved: tracker.achieved.iter().map(|msg| AchievedView::of(msg)).collect(),
            recent: tracker.recent().map(AchievedView::of),
            achieved_count: tracker.achieved.len(),
            milestone_count: MILESTONES.len(),
            progress: milestones::progress_percent(tracker.achieved.len()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TimerResponse {
    pub running: bool,
    pub start_time: Option<i64>,
    pub elapsed: Option<Elapsed>,
    pub display: Option<String>,
}

impl TimerResponse {
    pub fn at(start_time: Option<i64>, now_ms: i64) -> Self {
        let elapsed = start_time.map(|start| Elapsed::between(start, now_ms));
        Self {
            running: start_time.is_some(),
            start_time,
            display: elapsed.map(|e| e.to_string()),
            elapsed,
        }
    }
}
