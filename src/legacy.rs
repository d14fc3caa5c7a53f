//! Single-timer variant kept under its own key. It shares nothing with the
//! tracker collection: one raw millisecond timestamp, no title, no milestones.

use crate::errors::TrackerError;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tracing::error;

pub const START_TIME_KEY: &str = "startTime";

#[derive(Clone)]
pub struct SingleTimerStore {
    kv: Arc<dyn KeyValueStore>,
}

impl SingleTimerStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Unparseable values read as "not running".
    pub async fn start_time(&self) -> Option<i64> {
        match self.kv.get(START_TIME_KEY).await {
            Ok(Some(raw)) => match raw.trim().parse() {
                Ok(start) => Some(start),
                Err(err) => {
                    error!("ignoring saved start time {raw:?}: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                error!("failed to read saved start time: {err}");
                None
            }
        }
    }

    /// Starts the timer at `now_ms` unless it is already running.
    pub async fn start(&self, now_ms: i64) -> i64 {
        if let Some(start) = self.start_time().await {
            return start;
        }
        if let Err(err) = self.kv.set(START_TIME_KEY, now_ms.to_string()).await {
            error!("failed to save start time: {err}");
        }
        now_ms
    }

    pub async fn reset(&self, confirmed: bool) -> Result<(), TrackerError> {
        if !confirmed {
            return Err(TrackerError::ResetNotConfirmed);
        }
        if let Err(err) = self.kv.remove(START_TIME_KEY).await {
            error!("failed to clear saved start time: {err}");
        }
        Ok(())
    }
}
