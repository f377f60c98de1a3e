//! Data structures for the academy
//!
//! Defines learning progress, badges, CTF competitions and King of the Hill
//! instances, plus the ranking rules shared by every leaderboard.

pub mod badges;
pub mod ctf;
pub mod koth;
pub mod leaderboard;
pub mod progress;

pub use badges::*;
pub use ctf::*;
pub use koth::*;
pub use leaderboard::*;
pub use progress::*;

use serde::{Deserialize, Serialize};

/// Leaderboard and event id used for the local player
pub const CURRENT_USER_ID: &str = "current-user";

/// Display name used for the local player
pub const CURRENT_USER_NAME: &str = "You";

/// Difficulty of a CTF challenge or KotH instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Difficulty::Easy => "green",
            Difficulty::Medium => "purple",
            Difficulty::Hard => "red",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Format a number of seconds as `1h 02m 03s`, `4m 05s` or `6s`
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Round `numerator / denominator` half away from zero.
///
/// Returns 0 when the denominator is 0.
pub(crate) fn rounded_ratio(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        return 0;
    }
    (2 * numerator + denominator) / (2 * denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_are_compact() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(59), "59s");
        assert_eq!(format_duration(65), "1m 05s");
        assert_eq!(format_duration(3723), "1h 02m 03s");
    }

    #[test]
    fn ratios_round_half_up() {
        assert_eq!(rounded_ratio(100, 3), 33);
        assert_eq!(rounded_ratio(200, 3), 67);
        assert_eq!(rounded_ratio(25, 2), 13);
        assert_eq!(rounded_ratio(7, 0), 0);
    }

    #[test]
    fn difficulty_serializes_lowercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
    }
}
