use crate::tracker::TrackerId;
use chrono::Utc;
use ulid::Ulid;

/// Source of "now" as milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hands out tracker ids. Implementations must never repeat an id.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> TrackerId;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UlidGenerator;

impl IdGenerator for UlidGenerator {
    fn next_id(&self) -> TrackerId {
        TrackerId::from(Ulid::new().to_string())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ulid_ids_do_not_repeat_under_rapid_creation() {
        let ids = UlidGenerator;
        let seen: HashSet<TrackerId> = (0..1000).map(|_| ids.next_id()).collect();
        assert_eq!(seen.len(), 1000);
    }

    #[test]
    fn system_clock_is_past_2020() {
        assert!(SystemClock.now_ms() > 1_577_836_800_000);
    }
}
