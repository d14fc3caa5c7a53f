//! Tracker records and the in-memory collection they live in.
//!
//! A tracker's `start_time` is fixed at creation. Its `achieved` list only
//! grows, in the order milestones were reached, until the tracker is reset.

use crate::elapsed::total_seconds;
use crate::errors::TrackerError;
use crate::milestones::{self, Milestone};
use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackerId(String);

impl TrackerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TrackerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted shape matches what the browser build wrote to local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tracker {
    pub id: TrackerId,
    pub title: String,
    pub start_time: i64,
    #[serde(default)]
    pub achieved: Vec<String>,
}

impl Tracker {
    pub fn total_seconds(&self, now_ms: i64) -> u64 {
        total_seconds(self.start_time, now_ms)
    }

    pub fn recent(&self) -> Option<&str> {
        self.achieved.last().map(String::as_str)
    }
}

/// A milestone newly reached during a refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reached {
    pub tracker_id: TrackerId,
    pub title: String,
    pub milestone: &'static Milestone,
}

#[derive(Debug, Default)]
pub struct TrackerBook {
    trackers: Vec<Tracker>,
}

impl TrackerBook {
    /// Drops achieved entries that are not in the milestone table, or repeat.
    pub fn new(mut trackers: Vec<Tracker>) -> Self {
        for tracker in &mut trackers {
            let before = tracker.achieved.len();
            let mut seen = Vec::with_capacity(before);
            tracker.achieved.retain(|msg| {
                let keep = milestones::find(msg).is_some() && !seen.contains(msg);
                if keep {
                    seen.push(msg.clone());
                }
                keep
            });
            if tracker.achieved.len() != before {
                warn!(id = %tracker.id, "dropped unknown or repeated milestones from saved tracker");
            }
        }
        Self { trackers }
    }

    pub fn trackers(&self) -> &[Tracker] {
        &self.trackers
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }

    pub fn get(&self, id: &TrackerId) -> Option<&Tracker> {
        self.trackers.iter().find(|t| &t.id == id)
    }

    /// Adds a tracker and evaluates its milestones right away, so a start in
    /// the past reports what it has already reached.
    pub fn create(
        &mut self,
        id: TrackerId,
        title: &str,
        start_ms: i64,
        now_ms: i64,
    ) -> Result<&Tracker, TrackerError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(TrackerError::EmptyTitle);
        }
        if start_ms > now_ms {
            return Err(TrackerError::FutureStart);
        }

        let mut tracker = Tracker {
            id,
            title: title.to_string(),
            start_time: start_ms,
            achieved: Vec::new(),
        };
        milestones::evaluate(tracker.total_seconds(now_ms), &mut tracker.achieved);

        self.trackers.push(tracker);
        let index = self.trackers.len() - 1;
        Ok(&self.trackers[index])
    }

    pub fn reset(&mut self, id: &TrackerId, confirmed: bool) -> Result<Tracker, TrackerError> {
        if !confirmed {
            return Err(TrackerError::ResetNotConfirmed);
        }
        let index = self
            .trackers
            .iter()
            .position(|t| &t.id == id)
            .ok_or_else(|| TrackerError::NotFound(id.clone()))?;
        Ok(self.trackers.remove(index))
    }

    /// Runs the milestone evaluator over every tracker at `now_ms`.
    pub fn refresh(&mut self, now_ms: i64) -> Vec<Reached> {
        let mut reached = Vec::new();
        for tracker in &mut self.trackers {
            let total = tracker.total_seconds(now_ms);
            for milestone in milestones::evaluate(total, &mut tracker.achieved) {
                reached.push(Reached {
                    tracker_id: tracker.id.clone(),
                    title: tracker.title.clone(),
                    milestone,
                });
            }
        }
        reached
    }
}

/// Validates a user-picked start instant against `now_ms`.
///
/// Only RFC 3339 is accepted. The instant must carry its own offset, since the
/// picker's zone is the user's, not the server's.
pub fn parse_start(input: &str, now_ms: i64) -> Result<i64, TrackerError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(TrackerError::MissingStart);
    }
    let start = DateTime::parse_from_rfc3339(input)
        .map_err(|_| TrackerError::InvalidStart(input.to_string()))?
        .timestamp_millis();
    if start > now_ms {
        return Err(TrackerError::FutureStart);
    }
    Ok(start)
}
