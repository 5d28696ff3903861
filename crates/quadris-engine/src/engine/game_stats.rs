use std::time::Duration;

use serde::Serialize;

/// Score points per level.
pub const LEVEL_THRESHOLD: u32 = 15;

/// Fall interval at level 0, in milliseconds.
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;

/// Each level divides the fall interval by this factor.
pub const FALL_INTERVAL_RATIO: f64 = 1.4142;

/// How long the board stays empty of a falling piece after a line clear.
pub const LINE_CLEAR_PAUSE: Duration = Duration::from_millis(500);

/// Points for clearing `cleared_lines` rows with one piece: `2^n - 1`.
///
/// # Example
///
/// ```
/// use quadris_engine::line_clear_score;
///
/// assert_eq!(line_clear_score(1), 1);
/// assert_eq!(line_clear_score(4), 15);
/// ```
#[must_use]
pub fn line_clear_score(cleared_lines: u32) -> u32 {
    1_u32
        .checked_shl(cleared_lines)
        .map_or(u32::MAX, |p| p - 1)
}

/// Time between automatic one-row descents at `level`.
///
/// `1000 / 1.4142^level` milliseconds, truncated toward zero and never
/// shorter than one millisecond.
#[must_use]
pub fn fall_interval_for(level: u32) -> Duration {
    let exponent = i32::try_from(level).unwrap_or(i32::MAX);
    let millis = (f64::from(BASE_FALL_INTERVAL_MS) / FALL_INTERVAL_RATIO.powi(exponent)).trunc();
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let millis = millis as u64;
    Duration::from_millis(millis.max(1))
}

/// Score, line and level counters of one session.
///
/// - **Score**: `2^n - 1` points for every lock that clears `n` rows
/// - **Level**: goes up by one whenever `score / LEVEL_THRESHOLD` exceeds
///   it, at most once per score update
/// - **Fall interval**: derived from the level, see [`fall_interval_for`]
///
/// # Example
///
/// ```
/// use quadris_engine::GameStats;
///
/// let stats = GameStats::new();
/// assert_eq!(stats.level(), 0);
/// assert_eq!(stats.fall_interval().as_millis(), 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameStats {
    score: u32,
    cleared_lines: u32,
    level: u32,
    dropped_pieces: u32,
    fall_interval_ms: u32,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            cleared_lines: 0,
            level: 0,
            dropped_pieces: 0,
            fall_interval_ms: BASE_FALL_INTERVAL_MS,
        }
    }

    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub const fn cleared_lines(&self) -> u32 {
        self.cleared_lines
    }

    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Returns the number of pieces locked into the grid.
    #[must_use]
    pub const fn dropped_pieces(&self) -> u32 {
        self.dropped_pieces
    }

    #[must_use]
    pub fn fall_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.fall_interval_ms))
    }

    /// Counts one locked piece and the rows it cleared.
    pub(crate) fn record_drop(&mut self, cleared_lines: u32) {
        self.dropped_pieces += 1;
        self.cleared_lines += cleared_lines;
    }

    /// Adds `points` and re-evaluates the level.
    ///
    /// Returns `true` if the level went up.
    pub(crate) fn add_score(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score > 0 && self.score / LEVEL_THRESHOLD > self.level {
            self.level += 1;
            self.fall_interval_ms = duration_millis(fall_interval_for(self.level));
            return true;
        }
        false
    }
}

fn duration_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_clear_score() {
        assert_eq!(line_clear_score(0), 0);
        assert_eq!(line_clear_score(1), 1);
        assert_eq!(line_clear_score(2), 3);
        assert_eq!(line_clear_score(3), 7);
        assert_eq!(line_clear_score(4), 15);
        assert_eq!(line_clear_score(40), u32::MAX);
    }

    #[test]
    fn test_fall_interval_truncates() {
        assert_eq!(fall_interval_for(0), Duration::from_millis(1000));
        // 1000 / 1.4142 = 707.11...
        assert_eq!(fall_interval_for(1), Duration::from_millis(707));
        // 1000 / 1.99996... = 500.01...
        assert_eq!(fall_interval_for(2), Duration::from_millis(500));
        assert_eq!(fall_interval_for(3), Duration::from_millis(353));
        assert_eq!(fall_interval_for(10), Duration::from_millis(31));
    }

    #[test]
    fn test_fall_interval_floor() {
        assert_eq!(fall_interval_for(20), Duration::from_millis(1));
        assert_eq!(fall_interval_for(u32::MAX), Duration::from_millis(1));
    }

    #[test]
    fn test_record_drop() {
        let mut stats = GameStats::new();
        stats.record_drop(0);
        stats.record_drop(3);
        assert_eq!(stats.dropped_pieces(), 2);
        assert_eq!(stats.cleared_lines(), 3);
        assert_eq!(stats.score(), 0);
    }

    #[test]
    fn test_level_up_at_threshold() {
        let mut stats = GameStats::new();
        assert!(!stats.add_score(LEVEL_THRESHOLD - 1));
        assert_eq!(stats.level(), 0);

        assert!(stats.add_score(1));
        assert_eq!(stats.level(), 1);
        assert_eq!(stats.fall_interval(), fall_interval_for(1));
    }

    #[test]
    fn test_level_rises_at_most_one_per_update() {
        let mut stats = GameStats::new();
        assert!(stats.add_score(LEVEL_THRESHOLD * 3));
        assert_eq!(stats.level(), 1);

        // Zero-point updates still catch up one level at a time.
        assert!(stats.add_score(0));
        assert_eq!(stats.level(), 2);
        assert!(stats.add_score(0));
        assert_eq!(stats.level(), 3);
        assert!(!stats.add_score(0));
        assert_eq!(stats.level(), 3);
        assert_eq!(stats.fall_interval(), fall_interval_for(3));
    }

    #[test]
    fn test_serialization() {
        let mut stats = GameStats::new();
        stats.record_drop(1);
        stats.add_score(1);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["score"], 1);
        assert_eq!(json["cleared_lines"], 1);
        assert_eq!(json["fall_interval_ms"], 1000);
    }
}
