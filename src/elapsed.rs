use serde::Serialize;
use std::fmt;

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Time since a start instant, split into display units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Elapsed {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Elapsed {
    /// A start in the future yields zero rather than a negative duration.
    pub fn between(start_ms: i64, now_ms: i64) -> Self {
        Self::from_total_seconds(total_seconds(start_ms, now_ms))
    }

    pub fn from_total_seconds(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: (total % SECS_PER_DAY) / SECS_PER_HOUR,
            minutes: (total % SECS_PER_HOUR) / SECS_PER_MINUTE,
            seconds: total % SECS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MINUTE
            + self.seconds
    }
}

/// Formats as `DDd HHh MMm SSs`. Days are padded, never truncated.
impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}d {:02}h {:02}m {:02}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Whole seconds from `start_ms` to `now_ms`, clamped at zero.
pub fn total_seconds(start_ms: i64, now_ms: i64) -> u64 {
    if start_ms > now_ms {
        return 0;
    }
    ((now_ms as i128 - start_ms as i128) / 1000) as u64
}
