use serde::Serialize;

const HOUR: u64 = 60 * 60;
const DAY: u64 = 24 * HOUR;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Milestone {
    pub threshold_secs: u64,
    pub message: &'static str,
    pub icon: &'static str,
}

/// Ascending by threshold, no duplicates. Messages double as identifiers.
pub const MILESTONES: [Milestone; 9] = [
    Milestone {
        threshold_secs: HOUR,
        message: "1 hour completed. Proof of initial control.",
        icon: "🎯",
    },
    Milestone {
        threshold_secs: 6 * HOUR,
        message: "6 hours. Steady progress.",
        icon: "⚡",
    },
    Milestone {
        threshold_secs: 12 * HOUR,
        message: "12 hours. Half a day strong.",
        icon: "💪",
    },
    Milestone {
        threshold_secs: DAY,
        message: "1 day. Foundation set.",
        icon: "🏆",
    },
    Milestone {
        threshold_secs: 3 * DAY,
        message: "3 days. Momentum building.",
        icon: "🔥",
    },
    Milestone {
        threshold_secs: 7 * DAY,
        message: "7 days. Discipline forming.",
        icon: "💎",
    },
    Milestone {
        threshold_secs: 14 * DAY,
        message: "14 days. Habit shifting.",
        icon: "🌟",
    },
    Milestone {
        threshold_secs: 21 * DAY,
        message: "21 days. Resilience proven.",
        icon: "👑",
    },
    Milestone {
        threshold_secs: 30 * DAY,
        message: "30 days. Milestone achieved.",
        icon: "🏅",
    },
];

impl Milestone {
    /// "1 hour", "6 hours", "1 day", "3 days", ...
    pub fn label(&self) -> String {
        let (count, unit) = if self.threshold_secs >= DAY {
            (self.threshold_secs / DAY, "day")
        } else {
            (self.threshold_secs / HOUR, "hour")
        };
        if count == 1 {
            format!("{count} {unit}")
        } else {
            format!("{count} {unit}s")
        }
    }
}

pub fn find(message: &str) -> Option<&'static Milestone> {
    MILESTONES.iter().find(|m| m.message == message)
}

/// Appends every milestone reached by `total_secs` that is not yet in
/// `achieved`, in ascending threshold order, and returns the ones added.
pub fn evaluate(total_secs: u64, achieved: &mut Vec<String>) -> Vec<&'static Milestone> {
    let mut reached = Vec::new();
    for milestone in MILESTONES.iter() {
        if milestone.threshold_secs <= total_secs
            && !achieved.iter().any(|msg| msg == milestone.message)
        {
            achieved.push(milestone.message.to_string());
            reached.push(milestone);
        }
    }
    reached
}

pub fn progress_percent(achieved_count: usize) -> f64 {
    (achieved_count as f64 / MILESTONES.len() as f64 * 100.0).min(100.0)
}
